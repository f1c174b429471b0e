//! Data model for merging per-study escape measurements.

pub mod enums;
pub mod error;
pub mod study;
pub mod table;

pub use enums::{ConditionSubtype, ConditionType};
pub use error::{ErrorKind, EscapeError, Result};
pub use study::{
    CitationEntry, Condition, ConditionDescriptor, Study, StudyMetadata, VALID_YEARS,
    is_valid_year,
};
pub use table::{
    CITATION_OUTPUT_COLUMNS, CONDITION_COLUMN, ESCAPE_OUTPUT_COLUMNS, EnrichedRow, JoinedRow,
    MEASUREMENT_COLUMNS, MISSING_VALUE_TOKENS, MeasurementRow, MeasurementTable,
    parse_escape_value,
};
