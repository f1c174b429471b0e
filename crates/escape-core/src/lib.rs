//! Cross-study merge of escape measurements.
//!
//! [`run_pipeline`] walks the study folders under a data directory, validates
//! each one, registers it, and returns the merged escape rows together with a
//! disambiguated citation index. Writing the tables is left to the caller.

mod aggregate;
mod citation;
mod options;
mod registry;

pub use aggregate::{
    MergeAccumulator, MergedTables, RunSummary, StudySummary, ValidatedStudy, run_pipeline,
    validate_study,
};
pub use citation::build_citations;
pub use options::{DEFAULT_DATA_CSV, DEFAULT_DATA_DIR, DEFAULT_STUDY_YAML, ProcessOptions};
pub use registry::{StudyRegistry, check_naming_convention};
