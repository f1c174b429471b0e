//! Study folder ingestion.
//!
//! This crate locates study folders and reads their two input files. It makes
//! no decisions about content: schema and referential checks live in
//! `escape-validate`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use escape_ingest::{list_study_dirs, locate_study_files, load_metadata_yaml};
//!
//! for dir in list_study_dirs(Path::new("data"))? {
//!     let files = locate_study_files(&dir, "study.yml", "data.csv")?;
//!     let raw = load_metadata_yaml(&files.metadata)?;
//! }
//! ```

mod csv_table;
mod discovery;
mod metadata;

// === Study Folder Discovery ===
pub use discovery::{StudyFiles, list_study_dirs, locate_study_files};

// === File Loading ===
pub use csv_table::{read_measurement_table, read_measurement_table_from};
pub use metadata::{load_metadata_yaml, parse_metadata_yaml};
