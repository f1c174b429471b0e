use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::enums::{ConditionSubtype, ConditionType};

/// Years accepted for studies and conditions.
pub const VALID_YEARS: RangeInclusive<i64> = 2000..=2030;

/// Returns true if `year` lies in [`VALID_YEARS`].
pub fn is_valid_year(year: i64) -> bool {
    VALID_YEARS.contains(&year)
}

/// Validated contents of a study metadata file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMetadata {
    pub title: String,
    pub first_author: String,
    pub year: i64,
    pub journal: String,
    pub url: String,
    pub spike: String,
    pub notes: String,
    /// Conditions in metadata file order.
    pub conditions: Vec<Condition>,
}

/// A named condition and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    #[serde(flatten)]
    pub descriptor: ConditionDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDescriptor {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub subtype: ConditionSubtype,
    pub year: i64,
}

/// A registered study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    /// Study folder basename.
    pub id: String,
    pub first_author: String,
    pub year: i64,
    pub journal: String,
    pub url: String,
}

impl Study {
    /// Required folder name prefix for a study by `first_author` in `year`.
    pub fn id_prefix(year: i64, first_author: &str) -> String {
        format!("{year}_{first_author}_")
    }

    /// Citation without a disambiguating suffix.
    pub fn base_citation(&self) -> String {
        self.citation_with_suffix("")
    }

    pub fn citation_with_suffix(&self, suffix: &str) -> String {
        format!(
            "{} et al. {} ({}{suffix})",
            self.first_author, self.journal, self.year
        )
    }
}

/// One row of the study citation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub study: String,
    pub citation: String,
    pub url: String,
}
