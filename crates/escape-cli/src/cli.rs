//! CLI argument definitions for the escape data merger.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use escape_core::{DEFAULT_DATA_CSV, DEFAULT_DATA_DIR, DEFAULT_STUDY_YAML, ProcessOptions};

#[derive(Parser)]
#[command(
    name = "escape-merge",
    version,
    about = "Validate per-study escape data and merge it into combined tables",
    long_about = "Validate per-study escape data and merge it into combined tables.\n\n\
                  Every subfolder of the data directory holds one study: a metadata\n\
                  YAML file and a measurement CSV file. Results are written to\n\
                  processed_data/escape_data.csv and processed_data/studies.csv."
)]
pub struct Cli {
    /// Folder holding one subfolder per study.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Name of the metadata file inside each study folder.
    #[arg(long = "study-yaml", value_name = "NAME", default_value = DEFAULT_STUDY_YAML)]
    pub study_yaml: String,

    /// Name of the measurement file inside each study folder.
    #[arg(long = "data-csv", value_name = "NAME", default_value = DEFAULT_DATA_CSV)]
    pub data_csv: String,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions::default()
            .with_data_dir(&self.data_dir)
            .with_study_yaml(&self.study_yaml)
            .with_data_csv(&self.data_csv)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
