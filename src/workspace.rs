//! UI state for the comparison page.
//!
//! One workspace holds the two document slots, the comparison status and the
//! error message. Every slot mutation drops the current result so a result is
//! always about the documents currently loaded.

use tracing::{debug, info};

use crate::models::{ComparisonResult, Side};

/// Message shown when comparing without both documents.
pub const MISSING_DOCUMENTS: &str = "Por favor, sube ambos documentos";

/// One uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSlot {
    pub text: String,
    pub name: String,
    pub media_type: String,
}

/// Where the comparison stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Comparing,
    Compared(ComparisonResult),
    Failed(String),
}

/// Handed out by `begin_compare` and returned to `finish_compare`.
#[derive(Debug, Clone)]
pub struct CompareTicket {
    generation: u64,
    pub original: String,
    pub modified: String,
}

/// What happened to a finished comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    Applied,
    /// A slot changed while the comparison was running.
    Discarded,
}

/// Comparison page state.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    original: Option<DocumentSlot>,
    modified: Option<DocumentSlot>,
    status: Status,
    error: Option<String>,
    generation: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, side: Side) -> Option<&DocumentSlot> {
        match side {
            Side::Original => self.original.as_ref(),
            Side::Modified => self.modified.as_ref(),
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<DocumentSlot> {
        match side {
            Side::Original => &mut self.original,
            Side::Modified => &mut self.modified,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Result of the last comparison, if it still applies.
    pub fn result(&self) -> Option<&ComparisonResult> {
        match &self.status {
            Status::Compared(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_comparing(&self) -> bool {
        matches!(self.status, Status::Comparing)
    }

    /// Whether the compare button should be enabled.
    pub fn can_compare(&self) -> bool {
        self.original.is_some() && self.modified.is_some() && !self.is_comparing()
    }

    /// Store an accepted upload.
    pub fn accept_upload(&mut self, side: Side, slot: DocumentSlot) {
        info!("Loaded {} document: {}", side, slot.name);
        *self.slot_mut(side) = Some(slot);
        self.error = None;
        self.invalidate();
    }

    /// Record a rejected upload; slots stay as they were.
    pub fn reject_upload(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Empty a slot.
    pub fn clear(&mut self, side: Side) {
        if self.slot_mut(side).take().is_some() {
            debug!("Cleared {} document", side);
        }
        self.invalidate();
    }

    /// Drop the result. A running comparison is abandoned; its ticket no
    /// longer matches and `finish_compare` will discard it.
    fn invalidate(&mut self) {
        self.generation += 1;
        self.status = Status::Idle;
    }

    /// Start a comparison of the loaded documents.
    ///
    /// Returns `None` and records an error when a slot is empty. Also
    /// returns `None` while a comparison of the same documents is running.
    pub fn begin_compare(&mut self) -> Option<CompareTicket> {
        if self.is_comparing() {
            debug!("Comparison already running");
            return None;
        }
        let (Some(original), Some(modified)) = (&self.original, &self.modified) else {
            self.error = Some(MISSING_DOCUMENTS.to_string());
            return None;
        };

        let ticket = CompareTicket {
            generation: self.generation,
            original: original.text.clone(),
            modified: modified.text.clone(),
        };
        self.status = Status::Comparing;
        self.error = None;
        Some(ticket)
    }

    /// Apply the outcome of a comparison started with `ticket`.
    pub fn finish_compare(
        &mut self,
        ticket: CompareTicket,
        outcome: Result<ComparisonResult, String>,
    ) -> FinishOutcome {
        if ticket.generation != self.generation {
            info!("Discarding comparison of documents that have since changed");
            return FinishOutcome::Discarded;
        }

        match outcome {
            Ok(result) => {
                self.status = Status::Compared(result);
                self.error = None;
            }
            Err(message) => {
                self.status = Status::Failed(message.clone());
                self.error = Some(message);
            }
        }
        FinishOutcome::Applied
    }
}
