//! Comparison result model.
//!
//! These types mirror the JSON the completion API is instructed to produce.
//! The endpoint forwards that JSON untouched; validation into these types
//! happens on the consuming side (`ComparisonResult::from_value`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Kind of change reported for a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifferenceKind {
    Addition,
    Deletion,
    Modification,
}

impl DifferenceKind {
    /// Get the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Deletion => "deletion",
            Self::Modification => "modification",
        }
    }

    /// Parse a kind from its wire string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "addition" => Some(Self::Addition),
            "deletion" => Some(Self::Deletion),
            "modification" => Some(Self::Modification),
            _ => None,
        }
    }

    /// Label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Addition => "Adición",
            Self::Deletion => "Eliminación",
            Self::Modification => "Modificación",
        }
    }

    /// CSS class used for highlights of this kind.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Addition => "diff-addition",
            Self::Deletion => "diff-deletion",
            Self::Modification => "diff-modification",
        }
    }
}

impl std::fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete change between the two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    #[serde(rename = "type")]
    pub kind: DifferenceKind,
    pub content: String,
    pub location: String,
    pub significance: String,
}

/// Full structured output of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub differences: Vec<Difference>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub impact_analysis: String,
}

/// Structured error body returned by the compare endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Reasons a response value does not match the comparison shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("missing or non-array `differences` field")]
    MissingDifferences,

    #[error("difference {index}: {reason}")]
    InvalidDifference { index: usize, reason: String },

    #[error("field `{0}` must be a string")]
    NotAString(&'static str),
}

impl ComparisonResult {
    /// Validate a response value field by field.
    ///
    /// `differences` is mandatory and every entry must carry a known `type`
    /// plus string `content`, `location` and `significance`. `summary` and
    /// `impactAnalysis` default to empty when absent.
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        let entries = value
            .get("differences")
            .and_then(Value::as_array)
            .ok_or(ShapeError::MissingDifferences)?;

        let differences = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_difference(entry).map_err(|reason| {
                ShapeError::InvalidDifference { index, reason }
            }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            differences,
            summary: optional_string(value, "summary")?,
            impact_analysis: optional_string(value, "impactAnalysis")?,
        })
    }
}

fn parse_difference(entry: &Value) -> Result<Difference, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| "expected an object".to_string())?;

    let kind_str = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing `type`".to_string())?;
    let kind = DifferenceKind::from_str(kind_str)
        .ok_or_else(|| format!("unknown type `{}`", kind_str))?;

    let field = |name: &str| -> Result<String, String> {
        obj.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| format!("missing or non-string `{}`", name))
    };

    Ok(Difference {
        kind,
        content: field("content")?,
        location: field("location")?,
        significance: field("significance")?,
    })
}

fn optional_string(value: &Value, key: &'static str) -> Result<String, ShapeError> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ShapeError::NotAString(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full() {
        let value = json!({
            "differences": [
                {"type": "deletion", "content": "cat", "location": "line 1", "significance": "animal removed"}
            ],
            "summary": "one change",
            "impactAnalysis": "minor"
        });

        let result = ComparisonResult::from_value(&value).unwrap();
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].kind, DifferenceKind::Deletion);
        assert_eq!(result.summary, "one change");
        assert_eq!(result.impact_analysis, "minor");
    }

    #[test]
    fn test_from_value_requires_array() {
        assert_eq!(
            ComparisonResult::from_value(&json!({"summary": "x"})),
            Err(ShapeError::MissingDifferences)
        );
        assert_eq!(
            ComparisonResult::from_value(&json!({"differences": "none"})),
            Err(ShapeError::MissingDifferences)
        );
    }

    #[test]
    fn test_from_value_rejects_unknown_kind() {
        let value = json!({
            "differences": [
                {"type": "rename", "content": "a", "location": "b", "significance": "c"}
            ]
        });
        let err = ComparisonResult::from_value(&value).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidDifference { index: 0, .. }));
    }

    #[test]
    fn test_from_value_rejects_missing_field() {
        let value = json!({
            "differences": [
                {"type": "addition", "content": "a", "location": "b"}
            ]
        });
        let err = ComparisonResult::from_value(&value).unwrap_err();
        assert!(err.to_string().contains("significance"));
    }

    #[test]
    fn test_summary_defaults_when_absent() {
        let result = ComparisonResult::from_value(&json!({"differences": []})).unwrap();
        assert!(result.differences.is_empty());
        assert_eq!(result.summary, "");
        assert_eq!(result.impact_analysis, "");
    }

    #[test]
    fn test_serialized_field_names() {
        let result = ComparisonResult {
            differences: vec![Difference {
                kind: DifferenceKind::Addition,
                content: "dog".to_string(),
                location: "line 1".to_string(),
                significance: "new animal".to_string(),
            }],
            summary: "s".to_string(),
            impact_analysis: "i".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["differences"][0]["type"], "addition");
        assert_eq!(value["impactAnalysis"], "i");
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let body = ErrorBody {
            error: "Both documents are required".to_string(),
            details: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("details").is_none());
    }
}
