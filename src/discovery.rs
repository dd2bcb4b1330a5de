//! File discovery: filtered recursive traversal of the scan root.
//!
//! Hidden directories and every name in `EXCLUDED_DIRS` are pruned from
//! descent entirely; files are kept when their name ends with a supported
//! extension and contains no excluded-pattern substring. Order follows the
//! underlying walk and is not guaranteed stable across platforms.

use crate::config::CheckerConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_pruned_dir(name: &str, config: &CheckerConfig) -> bool {
    name.starts_with('.') || config.excluded_dirs.iter().any(|d| d == name)
}

/// True when the file name matches a supported extension and no
/// excluded pattern.
pub fn is_supported_file(name: &str, config: &CheckerConfig) -> bool {
    config
        .supported_extensions
        .iter()
        .any(|ext| name.ends_with(ext.as_str()))
        && !config
            .excluded_patterns
            .iter()
            .any(|pat| name.contains(pat.as_str()))
}

/// Collect every scannable file under `root`, one pass, each exactly once.
pub fn find_supported_files(root: &Path, config: &CheckerConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // The root itself is never pruned, even if its name is dotted.
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            !is_pruned_dir(name, config)
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or("");
        if is_supported_file(name, config) {
            files.push(entry.path().to_path_buf());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> BTreeSet<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_supported_excluded_and_pruned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.html"), "<html></html>").unwrap();
        fs::write(root.join("a.stories.jsx"), "export default {}").unwrap();
        fs::create_dir_all(root.join("node_modules")).unwrap();
        fs::write(root.join("node_modules/b.html"), "<html></html>").unwrap();

        let cfg = CheckerConfig::default();
        let files = find_supported_files(root, &cfg);
        assert_eq!(names(&files), BTreeSet::from(["a.html".to_string()]));
    }

    #[test]
    fn test_pruning_applies_at_any_depth() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/components/dist/deep")).unwrap();
        fs::write(root.join("src/components/Card.tsx"), "export {}").unwrap();
        fs::write(root.join("src/components/dist/deep/Out.tsx"), "export {}").unwrap();
        fs::create_dir_all(root.join("src/.hidden")).unwrap();
        fs::write(root.join("src/.hidden/Secret.tsx"), "export {}").unwrap();

        let cfg = CheckerConfig::default();
        let files = find_supported_files(root, &cfg);
        assert_eq!(names(&files), BTreeSet::from(["Card.tsx".to_string()]));
    }

    #[test]
    fn test_unsupported_extensions_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("style.css"), "body {}").unwrap();
        fs::write(root.join("notes.md"), "# notes").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let cfg = CheckerConfig::default();
        let files = find_supported_files(root, &cfg);
        assert_eq!(names(&files), BTreeSet::from(["style.css".to_string()]));
    }

    #[test]
    fn test_idempotent_as_a_set() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        fs::write(root.join("pages/about.twig"), "{{ content }}").unwrap();

        let cfg = CheckerConfig::default();
        let first = names(&find_supported_files(root, &cfg));
        let second = names(&find_supported_files(root, &cfg));
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_nonexistent_root_yields_nothing() {
        let cfg = CheckerConfig::default();
        let files = find_supported_files(Path::new("/nonexistent/path"), &cfg);
        assert!(files.is_empty());
    }

    #[test]
    fn test_is_supported_file() {
        let cfg = CheckerConfig::default();
        assert!(is_supported_file("Button.jsx", &cfg));
        assert!(!is_supported_file("Button.stories.jsx", &cfg));
        assert!(!is_supported_file("Button.js", &cfg));
    }
}
