//! Finding schema: one accessibility issue as returned by the model,
//! and the per-file result container consumed by the renderers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Issue severity, derived from WCAG impact by the model.
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

/// Case-insensitive deserialization; unrecognized values degrade to
/// [`Severity::Low`] so one nonconforming field never discards the rest
/// of an issue array.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            _ => Severity::Low,
        })
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single accessibility finding for one file.
///
/// The model is instructed to return a JSON array of exactly this shape;
/// missing fields fall back to empty defaults rather than failing the
/// whole array.
pub struct Issue {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub issue_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub line_numbers: Vec<u64>,
    #[serde(default)]
    pub code_snippet: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub severity: Severity,
}

impl Issue {
    /// Affected lines joined with ", " for display.
    pub fn lines_display(&self) -> String {
        self.line_numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone)]
/// Association of one scanned file with its (possibly empty) issue list.
pub struct ScanResult {
    pub file: PathBuf,
    pub issues: Vec<Issue>,
}

impl ScanResult {
    pub fn new(file: PathBuf, issues: Vec<Issue>) -> Self {
        ScanResult { file, issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::High.to_string(), "High");
        assert_eq!(Severity::Medium.to_string(), "Medium");
        assert_eq!(Severity::Low.to_string(), "Low");
    }

    #[test]
    fn test_issue_deserializes_with_defaults() {
        let issue: Issue = serde_json::from_str(r#"{"title":"Missing alt"}"#).unwrap();
        assert_eq!(issue.title, "Missing alt");
        assert_eq!(issue.severity, Severity::Low);
        assert!(issue.line_numbers.is_empty());
    }

    #[test]
    fn test_severity_deserializes_any_casing() {
        let issue: Issue = serde_json::from_str(r#"{"severity":"high"}"#).unwrap();
        assert_eq!(issue.severity, Severity::High);
        let issue: Issue = serde_json::from_str(r#"{"severity":"MEDIUM"}"#).unwrap();
        assert_eq!(issue.severity, Severity::Medium);
    }

    #[test]
    fn test_unknown_severity_degrades_to_low() {
        let issue: Issue =
            serde_json::from_str(r#"{"title":"t","severity":"critical"}"#).unwrap();
        assert_eq!(issue.title, "t");
        assert_eq!(issue.severity, Severity::Low);
    }

    #[test]
    fn test_lines_display() {
        let issue: Issue =
            serde_json::from_str(r#"{"line_numbers":[5,12,40],"severity":"High"}"#).unwrap();
        assert_eq!(issue.lines_display(), "5, 12, 40");
        assert_eq!(issue.severity, Severity::High);
    }
}
