//! Study identity registration.

use std::collections::BTreeSet;
use std::path::Path;

use escape_model::{EscapeError, Result, Study, StudyMetadata};

/// Checks that `study_id` starts with `"{year}_{first_author}_"`.
pub fn check_naming_convention(
    study_id: &str,
    dir: &Path,
    year: i64,
    first_author: &str,
) -> Result<()> {
    let expected_prefix = Study::id_prefix(year, first_author);
    if study_id.starts_with(&expected_prefix) {
        Ok(())
    } else {
        Err(EscapeError::NamingConvention {
            dir: dir.to_path_buf(),
            expected_prefix,
        })
    }
}

/// Studies registered so far, in processing order.
#[derive(Debug, Clone, Default)]
pub struct StudyRegistry {
    studies: Vec<Study>,
    ids: BTreeSet<String>,
}

impl StudyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the study in folder `dir` under `study_id`.
    ///
    /// # Errors
    ///
    /// [`EscapeError::NamingConvention`] if `study_id` does not encode the
    /// metadata year and first author, then [`EscapeError::DuplicateStudy`]
    /// if it is already registered.
    pub fn register(
        &mut self,
        study_id: &str,
        dir: &Path,
        metadata: &StudyMetadata,
    ) -> Result<()> {
        check_naming_convention(study_id, dir, metadata.year, &metadata.first_author)?;
        if !self.ids.insert(study_id.to_string()) {
            return Err(EscapeError::DuplicateStudy {
                study: study_id.to_string(),
            });
        }
        self.studies.push(Study {
            id: study_id.to_string(),
            first_author: metadata.first_author.clone(),
            year: metadata.year,
            journal: metadata.journal.clone(),
            url: metadata.url.clone(),
        });
        Ok(())
    }

    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    pub fn len(&self) -> usize {
        self.studies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }
}
