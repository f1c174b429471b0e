//! Pipeline configuration.

use std::path::PathBuf;

/// Default root folder holding one subfolder per study.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default metadata file name inside a study folder.
pub const DEFAULT_STUDY_YAML: &str = "study.yml";
/// Default measurement file name inside a study folder.
pub const DEFAULT_DATA_CSV: &str = "data.csv";

/// Where to find study folders and what their two files are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Root folder holding one subfolder per study.
    pub data_dir: PathBuf,
    /// Metadata file name inside each study folder.
    pub study_yaml: String,
    /// Measurement file name inside each study folder.
    pub data_csv: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            study_yaml: DEFAULT_STUDY_YAML.to_string(),
            data_csv: DEFAULT_DATA_CSV.to_string(),
        }
    }
}

impl ProcessOptions {
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    #[must_use]
    pub fn with_study_yaml(mut self, name: impl Into<String>) -> Self {
        self.study_yaml = name.into();
        self
    }

    #[must_use]
    pub fn with_data_csv(mut self, name: impl Into<String>) -> Self {
        self.data_csv = name.into();
        self
    }
}
