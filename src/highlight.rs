//! Anchoring reported differences inside document text.
//!
//! Best-effort string anchoring, not a diff: each difference's `content` is
//! searched for verbatim, moving forward through the document. Content the
//! model paraphrased or truncated is skipped silently.

use console::style;

use crate::models::{Difference, DifferenceKind, Side};

/// A run of document text, either untouched or highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Highlight {
        kind: DifferenceKind,
        text: &'a str,
        significance: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// Document text covered by this segment.
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) => *text,
            Segment::Highlight { text, .. } => *text,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight { .. })
    }

    /// Highlight kind, if any.
    pub fn kind(&self) -> Option<DifferenceKind> {
        match self {
            Segment::Plain(_) => None,
            Segment::Highlight { kind, .. } => Some(*kind),
        }
    }

    /// CSS class for the HTML view.
    pub fn css_class(&self) -> &'static str {
        match self {
            Segment::Plain(_) => "plain",
            Segment::Highlight { kind, .. } => kind.css_class(),
        }
    }

    /// Tooltip text; empty for plain segments.
    pub fn significance(&self) -> &'a str {
        match self {
            Segment::Plain(_) => "",
            Segment::Highlight { significance, .. } => *significance,
        }
    }
}

/// Split `text` into plain and highlighted segments for one side.
///
/// Differences are ordered by the first occurrence of their content; those
/// whose content never occurs (or is empty) go last in their original order
/// and end up skipped by the walk.
pub fn highlight<'a>(text: &'a str, differences: &'a [Difference], side: Side) -> Vec<Segment<'a>> {
    let kinds = side.relevant_kinds();
    let mut anchored: Vec<(Option<usize>, &Difference)> = differences
        .iter()
        .filter(|d| kinds.contains(&d.kind))
        .map(|d| (first_occurrence(text, &d.content), d))
        .collect();

    // Stable: ties and unmatched entries keep response order
    anchored.sort_by_key(|(pos, _)| (pos.is_none(), pos.unwrap_or(0)));

    let mut segments = Vec::new();
    let mut cursor = 0;

    for (_, diff) in anchored {
        if diff.content.is_empty() {
            continue;
        }
        let Some(offset) = text[cursor..].find(diff.content.as_str()) else {
            continue;
        };
        let start = cursor + offset;
        let end = start + diff.content.len();

        if start > cursor {
            segments.push(Segment::Plain(&text[cursor..start]));
        }
        segments.push(Segment::Highlight {
            kind: diff.kind,
            text: &text[start..end],
            significance: &diff.significance,
        });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(&text[cursor..]));
    }

    segments
}

fn first_occurrence(text: &str, content: &str) -> Option<usize> {
    if content.is_empty() {
        None
    } else {
        text.find(content)
    }
}

/// Concatenate segment texts; always equals the highlighted document.
pub fn plain_text(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// Render segments with terminal colors.
pub fn render_terminal(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => style(*text).dim().to_string(),
            Segment::Highlight { kind, text, .. } => match kind {
                DifferenceKind::Addition => style(*text).black().on_green().to_string(),
                DifferenceKind::Deletion => style(*text).black().on_red().to_string(),
                DifferenceKind::Modification => style(*text).black().on_yellow().to_string(),
            },
        })
        .collect()
}
