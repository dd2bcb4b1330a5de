//! Shared data models: scan findings and the per-run scan request.

pub mod issue;
pub mod request;

pub use issue::{Issue, ScanResult, Severity};
pub use request::{OutputFormat, ScanRequest, WcagLevel, WcagVersion};
