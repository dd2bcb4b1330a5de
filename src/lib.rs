//! AI-assisted WCAG accessibility scanner.
//!
//! Walks a source tree, sends each supported file's line-numbered content
//! to an OpenAI-compatible completion endpoint asking for a WCAG audit,
//! and renders the findings as a console table, console list, or PDF
//! report.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing and interactive input resolution.
//! - `config`: `checker.config.json` loading with built-in defaults.
//! - `discovery`: Filtered recursive traversal of the scan root.
//! - `scanner`: Prompt composition, model client, and response parsing.
//! - `models`: Data models for issues, results, and the scan request.
//! - `output`: Console table/list renderers.
//! - `pdf`: PDF report assembly.
//! - `utils`: Colored console prefixes.
pub mod cli;
pub mod config;
pub mod discovery;
pub mod models;
pub mod output;
pub mod pdf;
pub mod scanner;
pub mod utils;
