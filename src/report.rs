use std::path::PathBuf;

use serde::Serialize;

/// Outcome of one template entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Markers substituted, stamp applied, written as text.
    Rendered,
    /// Copied byte-for-byte.
    Copied,
    /// Left unwritten; the rest of the run continued.
    Failed { reason: String },
}

/// Per-file record in a generation report.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    /// Destination path relative to the destination root.
    pub dest_rel: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileResult {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

/// Aggregate result of one generation run. Per-file failures live here
/// rather than aborting the run.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub destination_root: PathBuf,
    pub results: Vec<FileResult>,
}

impl GenerationReport {
    /// Files actually written.
    pub fn succeeded(&self) -> usize {
        self.results.len() - self.failed()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileResult> + '_ {
        self.results.iter().filter(|r| r.is_failure())
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}
