//! Enumerated condition classifications.
//!
//! Metadata files spell these values out as free text; parsing is exact and
//! case-sensitive, so `Serum` or `antibody ` are rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of experimental condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionType {
    #[serde(rename = "antibody")]
    Antibody,
    #[serde(rename = "antibody cocktail")]
    AntibodyCocktail,
    #[serde(rename = "serum")]
    Serum,
}

impl ConditionType {
    pub const ALL: [ConditionType; 3] = [
        ConditionType::Antibody,
        ConditionType::AntibodyCocktail,
        ConditionType::Serum,
    ];

    /// Returns the value as written in metadata files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Antibody => "antibody",
            ConditionType::AntibodyCocktail => "antibody cocktail",
            ConditionType::Serum => "serum",
        }
    }

    /// Subtypes permitted for this condition type.
    ///
    /// Cocktails share the antibody domain.
    pub fn allowed_subtypes(&self) -> &'static [ConditionSubtype] {
        match self {
            ConditionType::Antibody | ConditionType::AntibodyCocktail => &[
                ConditionSubtype::ClinicalAntibody,
                ConditionSubtype::NotClinicalAntibody,
            ],
            ConditionType::Serum => &[
                ConditionSubtype::ConvalescentSerum,
                ConditionSubtype::ModernaVaccineSerum,
                ConditionSubtype::PfizerVaccineSerum,
            ],
        }
    }

    /// Returns true if `subtype` belongs to this type's domain.
    pub fn permits(&self, subtype: ConditionSubtype) -> bool {
        self.allowed_subtypes().contains(&subtype)
    }

    /// Returns true for conditions whose rows are dropped from merged output.
    pub fn is_excluded_from_output(&self) -> bool {
        matches!(self, ConditionType::AntibodyCocktail)
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown condition type: {s}"))
    }
}

/// Finer classification of a condition, constrained by its [`ConditionType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionSubtype {
    #[serde(rename = "clinical antibody")]
    ClinicalAntibody,
    #[serde(rename = "not clinical antibody")]
    NotClinicalAntibody,
    #[serde(rename = "convalescent serum")]
    ConvalescentSerum,
    #[serde(rename = "Moderna vaccine serum")]
    ModernaVaccineSerum,
    #[serde(rename = "Pfizer vaccine serum")]
    PfizerVaccineSerum,
}

impl ConditionSubtype {
    pub const ALL: [ConditionSubtype; 5] = [
        ConditionSubtype::ClinicalAntibody,
        ConditionSubtype::NotClinicalAntibody,
        ConditionSubtype::ConvalescentSerum,
        ConditionSubtype::ModernaVaccineSerum,
        ConditionSubtype::PfizerVaccineSerum,
    ];

    /// Returns the value as written in metadata files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionSubtype::ClinicalAntibody => "clinical antibody",
            ConditionSubtype::NotClinicalAntibody => "not clinical antibody",
            ConditionSubtype::ConvalescentSerum => "convalescent serum",
            ConditionSubtype::ModernaVaccineSerum => "Moderna vaccine serum",
            ConditionSubtype::PfizerVaccineSerum => "Pfizer vaccine serum",
        }
    }
}

impl fmt::Display for ConditionSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionSubtype::ALL
            .into_iter()
            .find(|subtype| subtype.as_str() == s)
            .ok_or_else(|| format!("Unknown condition subtype: {s}"))
    }
}
