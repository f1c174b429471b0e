//! Cross-study aggregation.
//!
//! The run has two phases:
//!
//! 1. **Per study**: [`validate_study`] reads one folder and returns a
//!    [`ValidatedStudy`]. It touches no shared state.
//! 2. **Merge**: [`MergeAccumulator::accumulate`] registers each validated
//!    study in processing order and appends its tagged rows;
//!    [`MergeAccumulator::finish`] drops excluded rows and builds citations.
//!
//! Any error aborts the run; nothing is kept from a failed run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span};

use escape_ingest::{
    StudyFiles, list_study_dirs, load_metadata_yaml, locate_study_files, read_measurement_table,
};
use escape_model::{CitationEntry, EnrichedRow, JoinedRow, Result, StudyMetadata};
use escape_validate::{JoinSources, join_measurements, resolve_conditions, validate_metadata};

use crate::citation::build_citations;
use crate::options::ProcessOptions;
use crate::registry::StudyRegistry;

/// Output of the per-study stage.
#[derive(Debug, Clone)]
pub struct ValidatedStudy {
    pub study_id: String,
    pub dir: PathBuf,
    pub metadata: StudyMetadata,
    pub rows: Vec<JoinedRow>,
}

/// Parses, validates, resolves, and joins one study folder.
pub fn validate_study(files: &StudyFiles) -> Result<ValidatedStudy> {
    let raw = load_metadata_yaml(&files.metadata)?;
    let metadata = validate_metadata(&raw, &files.metadata)?;
    let conditions = resolve_conditions(&metadata);
    let table = read_measurement_table(&files.measurements)?;
    let rows = join_measurements(
        &conditions,
        &table,
        JoinSources {
            metadata: &files.metadata,
            measurements: &files.measurements,
        },
    )?;
    Ok(ValidatedStudy {
        study_id: files.study_id.clone(),
        dir: files.dir.clone(),
        metadata,
        rows,
    })
}

/// Per-study counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudySummary {
    pub study: String,
    pub citation: String,
    pub conditions: usize,
    pub rows_joined: usize,
    pub rows_kept: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub studies: Vec<StudySummary>,
}

impl RunSummary {
    pub fn total_rows_joined(&self) -> usize {
        self.studies.iter().map(|s| s.rows_joined).sum()
    }

    pub fn total_rows_kept(&self) -> usize {
        self.studies.iter().map(|s| s.rows_kept).sum()
    }
}

/// Final tables of a successful run.
#[derive(Debug, Clone)]
pub struct MergedTables {
    /// Escape rows of all studies, excluded condition types removed.
    pub escape_rows: Vec<EnrichedRow>,
    /// One citation per study in processing order.
    pub citations: Vec<CitationEntry>,
    pub summary: RunSummary,
}

/// Rows and registry accumulated across studies.
#[derive(Debug, Clone, Default)]
pub struct MergeAccumulator {
    registry: StudyRegistry,
    rows: Vec<EnrichedRow>,
    // (conditions, rows joined) per registered study
    counts: Vec<(usize, usize)>,
}

impl MergeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `study` and appends its rows tagged with the study identifier.
    pub fn accumulate(mut self, study: ValidatedStudy) -> Result<Self> {
        self.registry
            .register(&study.study_id, &study.dir, &study.metadata)?;
        self.counts
            .push((study.metadata.conditions.len(), study.rows.len()));
        let study_id = study.study_id;
        self.rows
            .extend(study.rows.into_iter().map(|row| row.tag(&study_id)));
        Ok(self)
    }

    /// Drops excluded condition types and builds the citation index.
    pub fn finish(self) -> Result<MergedTables> {
        let citations = build_citations(self.registry.studies())?;

        let rows_joined = self.rows.len();
        let escape_rows: Vec<EnrichedRow> = self
            .rows
            .into_iter()
            .filter(|row| !row.condition_type().is_excluded_from_output())
            .collect();
        info!(
            rows_joined,
            rows_kept = escape_rows.len(),
            "dropped antibody cocktail rows"
        );

        let studies = self
            .registry
            .studies()
            .iter()
            .zip(&citations)
            .zip(&self.counts)
            .map(|((study, citation), &(conditions, rows_joined))| StudySummary {
                study: study.id.clone(),
                citation: citation.citation.clone(),
                conditions,
                rows_joined,
                rows_kept: escape_rows.iter().filter(|row| row.study == study.id).count(),
            })
            .collect();

        Ok(MergedTables {
            escape_rows,
            citations,
            summary: RunSummary { studies },
        })
    }
}

/// Runs the whole pipeline over the study folders named by `options`.
///
/// Folders are processed in name order, which fixes citation suffixes.
pub fn run_pipeline(options: &ProcessOptions) -> Result<MergedTables> {
    let start = Instant::now();
    info!(data_dir = %options.data_dir.display(), "processing data");
    let dirs = list_study_dirs(&options.data_dir)?;

    let mut accumulator = MergeAccumulator::new();
    for (index, dir) in dirs.iter().enumerate() {
        let span = info_span!("study", dir = %dir.display());
        let _guard = span.enter();
        let study = process_dir(dir, options)?;
        info!(
            progress = format!("{}/{}", index + 1, dirs.len()),
            study = %study.study_id,
            conditions = study.metadata.conditions.len(),
            rows = study.rows.len(),
            "{} has {} conditions",
            study.study_id,
            study.metadata.conditions.len()
        );
        accumulator = accumulator.accumulate(study)?;
    }

    let merged = accumulator.finish()?;
    info!(
        studies = merged.citations.len(),
        rows = merged.escape_rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "merge complete"
    );
    Ok(merged)
}

fn process_dir(dir: &Path, options: &ProcessOptions) -> Result<ValidatedStudy> {
    let files = locate_study_files(dir, &options.study_yaml, &options.data_csv)?;
    debug!(
        metadata = %files.metadata.display(),
        measurements = %files.measurements.display(),
        "located study files"
    );
    validate_study(&files)
}
