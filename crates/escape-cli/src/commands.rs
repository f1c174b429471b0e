use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use escape_core::{ProcessOptions, run_pipeline};
use escape_output::write_outputs;

use crate::types::MergeResult;

/// Validates every study under `options.data_dir` and writes the merged
/// tables to `output_dir`.
///
/// Nothing is written unless every study passes.
pub fn run_merge(options: &ProcessOptions, output_dir: &Path) -> Result<MergeResult> {
    let merged = run_pipeline(options)
        .with_context(|| format!("merge studies in {}", options.data_dir.display()))?;

    let outputs = write_outputs(output_dir, &merged.escape_rows, &merged.citations)
        .with_context(|| format!("write outputs to {}", output_dir.display()))?;
    info!(
        escape_data = %outputs.escape_data.display(),
        studies = %outputs.studies.display(),
        "outputs written"
    );

    Ok(MergeResult {
        data_dir: options.data_dir.clone(),
        summary: merged.summary,
        outputs,
    })
}
