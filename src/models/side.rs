//! Which of the two document slots something belongs to.

use serde::{Deserialize, Serialize};

use super::DifferenceKind;

/// One of the two compared documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First document, the one changes are made against.
    Original,
    /// Second document, the changed version.
    Modified,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Original, Side::Modified];

    /// Path segment used by the web routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Modified => "modified",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "original" | "1" | "doc1" => Some(Self::Original),
            "modified" | "2" | "doc2" => Some(Self::Modified),
            _ => None,
        }
    }

    /// Upload button label.
    pub fn upload_label(&self) -> &'static str {
        match self {
            Self::Original => "Subir Documento 1",
            Self::Modified => "Subir Documento 2",
        }
    }

    /// Difference kinds that can be anchored in this document.
    ///
    /// Deletions only exist in the original; additions and modifications
    /// only in the modified version.
    pub fn relevant_kinds(&self) -> &'static [DifferenceKind] {
        match self {
            Self::Original => &[DifferenceKind::Deletion],
            Self::Modified => &[DifferenceKind::Addition, DifferenceKind::Modification],
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
