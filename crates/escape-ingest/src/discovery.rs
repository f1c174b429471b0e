//! Study folder discovery and layout checks.

use std::path::{Path, PathBuf};

use tracing::debug;

use escape_model::{EscapeError, Result};

/// The two recognized files of one study folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyFiles {
    /// Path to the study folder.
    pub dir: PathBuf,
    /// Folder basename, used as the study identifier.
    pub study_id: String,
    /// Path to the metadata YAML file.
    pub metadata: PathBuf,
    /// Path to the measurement CSV file.
    pub measurements: PathBuf,
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| EscapeError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut paths = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| EscapeError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    Ok(paths)
}

/// Lists study folders under `data_dir`.
///
/// Hidden folders and plain files are skipped. Returns folders sorted by name,
/// which fixes the processing order of the whole run.
pub fn list_study_dirs(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(EscapeError::DirectoryNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let mut dirs: Vec<PathBuf> = read_entries(data_dir)?
        .into_iter()
        .filter(|path| path.is_dir() && !is_hidden(&entry_name(path)))
        .collect();
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(data_dir = %data_dir.display(), count = dirs.len(), "listed study folders");
    Ok(dirs)
}

/// Checks that `dir` holds exactly the metadata and measurement files.
///
/// Hidden entries are ignored. The metadata file is checked first, then
/// unexpected entries, then the measurement file.
pub fn locate_study_files(
    dir: &Path,
    metadata_name: &str,
    measurement_name: &str,
) -> Result<StudyFiles> {
    let metadata = dir.join(metadata_name);
    let measurements = dir.join(measurement_name);

    if !metadata.is_file() {
        return Err(EscapeError::MissingFile { path: metadata });
    }

    let mut extras: Vec<String> = read_entries(dir)?
        .iter()
        .map(|path| entry_name(path))
        .filter(|name| !is_hidden(name) && name != metadata_name && name != measurement_name)
        .collect();
    if !extras.is_empty() {
        extras.sort();
        return Err(EscapeError::ExtraFiles {
            dir: dir.to_path_buf(),
            files: extras,
        });
    }

    if !measurements.is_file() {
        return Err(EscapeError::MissingFile { path: measurements });
    }

    Ok(StudyFiles {
        dir: dir.to_path_buf(),
        study_id: entry_name(dir),
        metadata,
        measurements,
    })
}
