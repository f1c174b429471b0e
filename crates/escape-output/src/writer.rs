//! Writing the merged tables to the output directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use escape_model::{CitationEntry, EnrichedRow, EscapeError, Result};

use crate::tables::{render_citation_table, render_escape_table};

/// Output directory used by the command line tool.
pub const DEFAULT_OUTPUT_DIR: &str = "processed_data";
/// File name of the merged escape table.
pub const ESCAPE_DATA_FILE: &str = "escape_data.csv";
/// File name of the study citation index.
pub const STUDIES_FILE: &str = "studies.csv";

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub escape_data: PathBuf,
    pub studies: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            escape_data: output_dir.join(ESCAPE_DATA_FILE),
            studies: output_dir.join(STUDIES_FILE),
        }
    }
}

/// Writes `escape_data.csv` and `studies.csv` under `output_dir`.
///
/// Both tables are rendered and staged as temporary files inside
/// `output_dir` before either target is replaced. If moving the second file
/// into place fails, the first is removed again. Existing files are
/// overwritten.
pub fn write_outputs(
    output_dir: &Path,
    escape_rows: &[EnrichedRow],
    citations: &[CitationEntry],
) -> Result<OutputPaths> {
    let paths = OutputPaths::in_dir(output_dir);
    let escape_data =
        render_escape_table(escape_rows).map_err(|err| write_error(&paths.escape_data, &err))?;
    let studies =
        render_citation_table(citations).map_err(|err| write_error(&paths.studies, &err))?;

    fs::create_dir_all(output_dir).map_err(|err| write_error(output_dir, &err))?;

    info!(path = %paths.escape_data.display(), rows = escape_rows.len(), "writing escape data");
    let staged_escape = stage(output_dir, &escape_data, &paths.escape_data)?;
    info!(path = %paths.studies.display(), studies = citations.len(), "writing study citations");
    let staged_studies = stage(output_dir, &studies, &paths.studies)?;

    staged_escape
        .persist(&paths.escape_data)
        .map_err(|err| write_error(&paths.escape_data, &err.error))?;
    if let Err(err) = staged_studies.persist(&paths.studies) {
        if let Err(cleanup) = fs::remove_file(&paths.escape_data) {
            warn!(
                path = %paths.escape_data.display(),
                error = %cleanup,
                "failed to remove escape data"
            );
        }
        return Err(write_error(&paths.studies, &err.error));
    }

    Ok(paths)
}

/// Writes `contents` to a temporary file in `dir`, destined for `target`.
fn stage(dir: &Path, contents: &[u8], target: &Path) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir).map_err(|err| write_error(target, &err))?;
    file.write_all(contents)
        .and_then(|()| file.flush())
        .map_err(|err| write_error(target, &err))?;
    Ok(file)
}

fn write_error(path: &Path, err: &dyn std::error::Error) -> EscapeError {
    EscapeError::OutputWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
