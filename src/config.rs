//! Scanner configuration loaded from `checker.config.json`.
//!
//! Defaults when no config file is present:
//! - extensions: `.html .twig .css .scss .pcss .jsx .tsx`
//! - excluded dirs: `node_modules storybook .git __pycache__ dist build`
//! - excluded patterns: `.stories.jsx .stories.tsx`
//! - model: `gpt-4o`
//!
//! A missing file falls back to defaults with a note; a present but
//! malformed file is a fatal error.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "checker.config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
/// Immutable per-process scanner settings.
///
/// Field names mirror the JSON keys of the settings file. Keys missing
/// from a present file fall back to the same defaults per-field.
pub struct CheckerConfig {
    #[serde(rename = "SUPPORTED_EXTENSIONS")]
    pub supported_extensions: Vec<String>,
    #[serde(rename = "EXCLUDED_DIRS")]
    pub excluded_dirs: Vec<String>,
    #[serde(rename = "EXCLUDED_PATTERNS")]
    pub excluded_patterns: Vec<String>,
    #[serde(rename = "MODEL")]
    pub model: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            supported_extensions: [".html", ".twig", ".css", ".scss", ".pcss", ".jsx", ".tsx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_dirs: ["node_modules", "storybook", ".git", "__pycache__", "dist", "build"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_patterns: [".stories.jsx", ".stories.tsx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model: "gpt-4o".to_string(),
        }
    }
}

/// Load the settings file from `dir`, or defaults when absent.
///
/// The boolean is `true` when a config file was actually found, so the
/// caller can emit the "using defaults" note itself.
pub fn load(dir: &Path) -> anyhow::Result<(CheckerConfig, bool)> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok((CheckerConfig::default(), false));
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cfg: CheckerConfig = serde_json::from_str(&raw)
        .with_context(|| format!("malformed {}", path.display()))?;
    Ok((cfg, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_absent() {
        let dir = tempdir().unwrap();
        let (cfg, found) = load(dir.path()).unwrap();
        assert!(!found);
        assert!(cfg.supported_extensions.contains(&".twig".to_string()));
        assert!(cfg.excluded_dirs.contains(&"node_modules".to_string()));
        assert_eq!(cfg.model, "gpt-4o");
    }

    #[test]
    fn test_loads_file_values() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{
                "SUPPORTED_EXTENSIONS": [".html"],
                "EXCLUDED_DIRS": ["vendor"],
                "EXCLUDED_PATTERNS": [".min.html"],
                "MODEL": "gpt-4o-mini"
            }"#,
        )
        .unwrap();
        let (cfg, found) = load(dir.path()).unwrap();
        assert!(found);
        assert_eq!(cfg.supported_extensions, vec![".html"]);
        assert_eq!(cfg.excluded_dirs, vec!["vendor"]);
        assert_eq!(cfg.model, "gpt-4o-mini");
    }

    #[test]
    fn test_partial_file_falls_back_per_field() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"MODEL": "gpt-4.1"}"#).unwrap();
        let (cfg, _) = load(dir.path()).unwrap();
        assert_eq!(cfg.model, "gpt-4.1");
        assert!(cfg.supported_extensions.contains(&".html".to_string()));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        assert!(load(dir.path()).is_err());
    }
}
