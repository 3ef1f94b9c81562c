//! Sequential batch processing over the item table.

/// Per-item run-mode prompting.
pub mod prompt;
/// Batch runner and report.
pub mod runner;
/// CSV item table.
pub mod table;
