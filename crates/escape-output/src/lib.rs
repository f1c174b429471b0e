//! Output generation for merged escape tables.
//!
//! Both tables are rendered to memory before anything touches the output
//! directory, so a failed render leaves no files behind.

mod format;
mod tables;
mod writer;

pub use format::{ESCAPE_SIGNIFICANT_DIGITS, format_escape_value, format_significant};
pub use tables::{render_citation_table, render_escape_table};
pub use writer::{
    DEFAULT_OUTPUT_DIR, ESCAPE_DATA_FILE, OutputPaths, STUDIES_FILE, write_outputs,
};
