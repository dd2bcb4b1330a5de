//! Per-run scan parameters: WCAG level/version, output format, and root.

use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// WCAG conformance level requested for the audit.
pub enum WcagLevel {
    #[value(name = "A")]
    A,
    #[value(name = "AA")]
    Aa,
    #[value(name = "AAA")]
    Aaa,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::Aa => write!(f, "AA"),
            WcagLevel::Aaa => write!(f, "AAA"),
        }
    }
}

impl std::str::FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(WcagLevel::A),
            "AA" => Ok(WcagLevel::Aa),
            "AAA" => Ok(WcagLevel::Aaa),
            other => Err(format!("invalid WCAG level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// WCAG version the audit should target.
pub enum WcagVersion {
    #[value(name = "2.0")]
    V2_0,
    #[value(name = "2.1")]
    V2_1,
    #[value(name = "2.2")]
    V2_2,
}

impl std::fmt::Display for WcagVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagVersion::V2_0 => write!(f, "2.0"),
            WcagVersion::V2_1 => write!(f, "2.1"),
            WcagVersion::V2_2 => write!(f, "2.2"),
        }
    }
}

impl std::str::FromStr for WcagVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2.0" => Ok(WcagVersion::V2_0),
            "2.1" => Ok(WcagVersion::V2_1),
            "2.2" => Ok(WcagVersion::V2_2),
            other => Err(format!("invalid WCAG version: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// How scan results are rendered.
pub enum OutputFormat {
    Table,
    List,
    Pdf,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::List => write!(f, "list"),
            OutputFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "list" => Ok(OutputFormat::List),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(format!("invalid output format: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved inputs for one scan run. Immutable once built.
pub struct ScanRequest {
    pub level: WcagLevel,
    pub version: WcagVersion,
    pub format: OutputFormat,
    pub root: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_and_display() {
        assert_eq!("aa".parse::<WcagLevel>().unwrap(), WcagLevel::Aa);
        assert_eq!("AAA".parse::<WcagLevel>().unwrap(), WcagLevel::Aaa);
        assert_eq!(WcagLevel::A.to_string(), "A");
        assert!("B".parse::<WcagLevel>().is_err());
    }

    #[test]
    fn test_version_parse_and_display() {
        assert_eq!("2.1".parse::<WcagVersion>().unwrap(), WcagVersion::V2_1);
        assert_eq!(WcagVersion::V2_2.to_string(), "2.2");
        assert!("3.0".parse::<WcagVersion>().is_err());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("Table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("pdf".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
