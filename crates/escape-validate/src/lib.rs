//! Per-study validation.
//!
//! Turns the raw inputs of one study folder into typed values:
//!
//! - [`validate_metadata`]: untyped YAML to [`escape_model::StudyMetadata`]
//! - [`resolve_conditions`]: ordered condition table
//! - [`join_measurements`]: measurement rows joined to conditions with
//!   referential-integrity checks

mod conditions;
mod join;
mod schema;

pub use conditions::{ConditionTable, resolve_conditions};
pub use join::{JoinSources, join_measurements};
pub use schema::{CONDITION_KEYS, STUDY_KEYS, validate_metadata};
