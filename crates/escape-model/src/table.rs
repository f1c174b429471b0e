use std::collections::BTreeSet;
use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};

use crate::enums::ConditionType;
use crate::study::ConditionDescriptor;

/// Column linking measurement rows to metadata conditions.
pub const CONDITION_COLUMN: &str = "condition";

/// Columns every measurement table must carry, in check order.
pub const MEASUREMENT_COLUMNS: [&str; 5] =
    ["condition", "site", "wildtype", "mutation", "mut_escape"];

/// Header of the merged escape table.
pub const ESCAPE_OUTPUT_COLUMNS: [&str; 9] = [
    "condition",
    "condition_type",
    "condition_subtype",
    "condition_year",
    "site",
    "wildtype",
    "mutation",
    "mut_escape",
    "study",
];

/// Header of the citation index.
pub const CITATION_OUTPUT_COLUMNS: [&str; 3] = ["study", "citation", "url"];

/// Cell contents read as a missing numeric value.
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parses a `mut_escape` cell; missing-value tokens yield `None`.
pub fn parse_escape_value(raw: &str) -> Result<Option<f64>, ParseFloatError> {
    let trimmed = raw.trim();
    if MISSING_VALUE_TOKENS.contains(&trimmed) {
        return Ok(None);
    }
    trimmed.parse::<f64>().map(Some)
}

/// A raw measurement file: header plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MeasurementTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Distinct values of column `index`; short rows contribute an empty string.
    pub fn distinct_values(&self, index: usize) -> BTreeSet<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One escape measurement projected onto the required columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub condition: String,
    pub site: String,
    pub wildtype: String,
    pub mutation: String,
    pub mut_escape: Option<f64>,
}

/// A measurement joined to its condition classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRow {
    pub descriptor: ConditionDescriptor,
    pub measurement: MeasurementRow,
}

impl JoinedRow {
    /// Attaches the owning study identifier.
    pub fn tag(self, study: &str) -> EnrichedRow {
        EnrichedRow {
            descriptor: self.descriptor,
            measurement: self.measurement,
            study: study.to_string(),
        }
    }
}

/// A row of the merged escape table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub descriptor: ConditionDescriptor,
    pub measurement: MeasurementRow,
    pub study: String,
}

impl EnrichedRow {
    pub fn condition(&self) -> &str {
        &self.measurement.condition
    }

    pub fn condition_type(&self) -> ConditionType {
        self.descriptor.condition_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_escape_value() {
        assert_eq!(parse_escape_value("0.25"), Ok(Some(0.25)));
        assert_eq!(parse_escape_value(" 1e-3 "), Ok(Some(0.001)));
        assert_eq!(parse_escape_value(""), Ok(None));
        assert_eq!(parse_escape_value("NaN"), Ok(None));
        assert_eq!(parse_escape_value("NA"), Ok(None));
        assert!(parse_escape_value("high").is_err());
    }

    #[test]
    fn test_distinct_values() {
        let table = MeasurementTable::new(
            vec!["condition".to_string(), "site".to_string()],
            vec![
                vec!["C1".to_string(), "331".to_string()],
                vec!["C2".to_string(), "331".to_string()],
                vec!["C1".to_string(), "332".to_string()],
            ],
        );
        let index = table.column_index("condition").unwrap();
        let values: Vec<&str> = table.distinct_values(index).into_iter().collect();
        assert_eq!(values, vec!["C1", "C2"]);
        assert!(!table.has_column("mut_escape"));
    }
}
