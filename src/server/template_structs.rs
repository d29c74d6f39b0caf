//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;

use crate::highlight::{highlight, Segment};
use crate::models::{ComparisonResult, Side};
use crate::workspace::{DocumentSlot, Workspace};

/// One document column.
pub struct PanelView<'a> {
    pub side: &'static str,
    pub upload_label: &'static str,
    pub document: Option<&'a DocumentSlot>,
    /// Whether a result is shown over this document.
    pub highlighted: bool,
    pub segments: Vec<Segment<'a>>,
}

impl<'a> PanelView<'a> {
    fn new(
        side: Side,
        document: Option<&'a DocumentSlot>,
        result: Option<&'a ComparisonResult>,
    ) -> Self {
        let segments = match (document, result) {
            (Some(doc), Some(result)) => highlight(&doc.text, &result.differences, side),
            _ => Vec::new(),
        };

        Self {
            side: side.as_str(),
            upload_label: side.upload_label(),
            document,
            highlighted: document.is_some() && result.is_some(),
            segments,
        }
    }
}

/// The comparison page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub panels: Vec<PanelView<'a>>,
    pub result: Option<&'a ComparisonResult>,
    pub error: Option<&'a str>,
    pub comparing: bool,
    pub can_compare: bool,
    pub configured: bool,
}

impl<'a> IndexTemplate<'a> {
    pub fn from_workspace(ws: &'a Workspace, configured: bool) -> Self {
        let result = ws.result();
        let panels = Side::BOTH
            .iter()
            .map(|&side| PanelView::new(side, ws.slot(side), result))
            .collect();

        Self {
            panels,
            result,
            error: ws.error(),
            comparing: ws.is_comparing(),
            can_compare: ws.can_compare(),
            configured,
        }
    }

    /// Whether the analysis heading is shown.
    pub fn has_analysis(&self) -> bool {
        self.result.is_some() || self.error.is_some()
    }
}
