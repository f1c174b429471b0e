use std::path::PathBuf;

use escape_core::RunSummary;
use escape_output::OutputPaths;

/// Outcome of a successful merge run.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub data_dir: PathBuf,
    pub summary: RunSummary,
    pub outputs: OutputPaths,
}
