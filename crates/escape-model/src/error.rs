//! Error types for study validation and merging.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating and merging study folders.
///
/// Every check in the pipeline is fail-fast: the first variant produced aborts
/// the run before any output is written.
#[derive(Debug, Error)]
pub enum EscapeError {
    // === Input Layout Errors ===
    /// Data directory not found or not a directory.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recognized study file is absent.
    #[error("missing file {path}")]
    MissingFile { path: PathBuf },

    /// A study folder holds entries other than the two recognized files.
    #[error("extra files in {dir}: {}", .files.join(", "))]
    ExtraFiles { dir: PathBuf, files: Vec<String> },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Metadata file is not valid YAML.
    #[error("failed to parse YAML {path}: {message}")]
    YamlParse { path: PathBuf, message: String },

    /// Measurement file is not valid CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Metadata Schema Errors ===
    /// Top-level metadata keys differ from the required key set.
    #[error("invalid key set in {path}: {}", .difference.join(", "))]
    Schema {
        path: PathBuf,
        difference: Vec<String>,
    },

    /// A condition lacks one of `type`, `subtype`, `year`.
    #[error("missing `{field}` for condition `{condition}` in {path}")]
    MissingField {
        path: PathBuf,
        condition: String,
        field: String,
    },

    /// A value lies outside its enumerated domain.
    #[error("invalid {field} `{value}` in {path}{}", location_suffix(.location.as_deref()))]
    InvalidValue {
        path: PathBuf,
        location: Option<String>,
        field: String,
        value: String,
    },

    // === Measurement Table Errors ===
    /// Measurement table lacks a required column.
    #[error("{path} lacks column `{column}`")]
    MissingColumn { path: PathBuf, column: String },

    /// Conditions in metadata and measurement table disagree.
    #[error(
        "conditions in {metadata} do not match those in {data}: {}",
        .difference.join(", ")
    )]
    ReferentialIntegrity {
        metadata: PathBuf,
        data: PathBuf,
        difference: Vec<String>,
    },

    /// A measurement row resolved to zero or several condition entries.
    #[error("condition `{condition}` in {path} matched {matches} condition entries, expected 1")]
    JoinInvariant {
        path: PathBuf,
        condition: String,
        matches: usize,
    },

    // === Registry Errors ===
    /// Study folder name does not encode the metadata year and first author.
    #[error("{dir} should start with {expected_prefix} to reflect year and first author")]
    NamingConvention {
        dir: PathBuf,
        expected_prefix: String,
    },

    /// Study identifier registered twice.
    #[error("duplicate study {study}")]
    DuplicateStudy { study: String },

    /// More studies share an (author, year, journal) triple than there are suffix letters.
    #[error("{count} studies share citation `{citation}`; at most 26 can be disambiguated")]
    CitationOverflow { citation: String, count: usize },

    // === Output Errors ===
    /// Failed to write an output table.
    #[error("failed to write {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },
}

/// Coarse classification of [`EscapeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    MissingField,
    InvalidValue,
    MissingColumn,
    ReferentialIntegrity,
    NamingConvention,
    DuplicateStudy,
    ExtraFiles,
    MissingFile,
    CitationOverflow,
    JoinInvariant,
    Parse,
    Io,
}

impl EscapeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema { .. } => ErrorKind::Schema,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::MissingColumn { .. } => ErrorKind::MissingColumn,
            Self::ReferentialIntegrity { .. } => ErrorKind::ReferentialIntegrity,
            Self::NamingConvention { .. } => ErrorKind::NamingConvention,
            Self::DuplicateStudy { .. } => ErrorKind::DuplicateStudy,
            Self::ExtraFiles { .. } => ErrorKind::ExtraFiles,
            Self::MissingFile { .. } => ErrorKind::MissingFile,
            Self::CitationOverflow { .. } => ErrorKind::CitationOverflow,
            Self::JoinInvariant { .. } => ErrorKind::JoinInvariant,
            Self::YamlParse { .. } | Self::CsvParse { .. } => ErrorKind::Parse,
            Self::DirectoryNotFound { .. }
            | Self::DirectoryRead { .. }
            | Self::FileRead { .. }
            | Self::OutputWrite { .. } => ErrorKind::Io,
        }
    }
}

fn location_suffix(location: Option<&str>) -> String {
    location
        .map(|location| format!(" for {location}"))
        .unwrap_or_default()
}

/// Result type for validation and merge operations.
pub type Result<T> = std::result::Result<T, EscapeError>;
