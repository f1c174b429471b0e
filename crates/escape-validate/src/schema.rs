//! Metadata schema checks.
//!
//! Converts the untyped YAML mapping of a study metadata file into a
//! [`StudyMetadata`]. Checks run in a fixed order and the first violation is
//! returned:
//!
//! 1. top-level key set
//! 2. per condition, in file order: `type`/`subtype`/`year` presence, then
//!    type, subtype, and year domains
//! 3. `study_year`
//! 4. text fields (`study_first_author`, `study_journal`, `study_url`)

use std::collections::BTreeSet;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use escape_model::{
    Condition, ConditionDescriptor, ConditionSubtype, ConditionType, EscapeError, Result,
    StudyMetadata, is_valid_year,
};

/// Top-level keys every metadata file must carry, and no others.
pub const STUDY_KEYS: [&str; 8] = [
    "study_title",
    "study_first_author",
    "study_year",
    "study_journal",
    "study_url",
    "spike",
    "notes",
    "conditions",
];

/// Keys every condition record must carry.
pub const CONDITION_KEYS: [&str; 3] = ["type", "subtype", "year"];

/// Renders a scalar YAML value as text; `None` for collections.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Renders any YAML value for error messages and opaque fields.
fn render(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| {
        serde_yaml::to_string(value)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default()
    })
}

fn key_name(key: &Value) -> String {
    render(key)
}

fn invalid(path: &Path, location: Option<String>, field: &str, value: &Value) -> EscapeError {
    EscapeError::InvalidValue {
        path: path.to_path_buf(),
        location,
        field: field.to_string(),
        value: render(value),
    }
}

fn check_key_set(root: &Value, path: &Path) -> Result<()> {
    let required: BTreeSet<String> = STUDY_KEYS.iter().map(|key| (*key).to_string()).collect();
    let present: BTreeSet<String> = match root {
        Value::Mapping(mapping) => mapping.keys().map(key_name).collect(),
        _ => BTreeSet::new(),
    };
    if present != required {
        return Err(EscapeError::Schema {
            path: path.to_path_buf(),
            difference: required.symmetric_difference(&present).cloned().collect(),
        });
    }
    Ok(())
}

/// Parses a year that must be an integer in the accepted range.
fn check_year(value: &Value) -> Option<i64> {
    value.as_i64().filter(|year| is_valid_year(*year))
}

fn check_condition(id: &str, record: &Value, path: &Path) -> Result<ConditionDescriptor> {
    let location = || Some(format!("condition `{id}`"));
    for key in CONDITION_KEYS {
        if record.get(key).is_none() {
            return Err(EscapeError::MissingField {
                path: path.to_path_buf(),
                condition: id.to_string(),
                field: key.to_string(),
            });
        }
    }

    let type_value = &record["type"];
    let condition_type = type_value
        .as_str()
        .and_then(|text| text.parse::<ConditionType>().ok())
        .ok_or_else(|| invalid(path, location(), "type", type_value))?;

    let subtype_value = &record["subtype"];
    let subtype = subtype_value
        .as_str()
        .and_then(|text| text.parse::<ConditionSubtype>().ok())
        .filter(|subtype| condition_type.permits(*subtype))
        .ok_or_else(|| invalid(path, location(), "subtype", subtype_value))?;

    let year_value = &record["year"];
    let year = check_year(year_value).ok_or_else(|| invalid(path, location(), "year", year_value))?;

    Ok(ConditionDescriptor {
        condition_type,
        subtype,
        year,
    })
}

fn check_conditions(value: &Value, path: &Path) -> Result<Vec<Condition>> {
    let Value::Mapping(records) = value else {
        return Err(invalid(path, None, "conditions", value));
    };
    let mut conditions = Vec::with_capacity(records.len());
    for (key, record) in records {
        let id =
            scalar_text(key).ok_or_else(|| invalid(path, None, "condition identifier", key))?;
        let descriptor = check_condition(&id, record, path)?;
        debug!(
            condition = %id,
            condition_type = %descriptor.condition_type,
            subtype = %descriptor.subtype,
            year = descriptor.year,
            "validated condition"
        );
        conditions.push(Condition { id, descriptor });
    }
    Ok(conditions)
}

fn text_field(root: &Value, key: &str, path: &Path) -> Result<String> {
    let value = &root[key];
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(path, None, key, value))
}

/// Validates raw metadata loaded from `path`.
///
/// # Errors
///
/// Returns [`EscapeError::Schema`], [`EscapeError::MissingField`], or
/// [`EscapeError::InvalidValue`] for the first violation found.
pub fn validate_metadata(raw: &Value, path: &Path) -> Result<StudyMetadata> {
    check_key_set(raw, path)?;
    let conditions = check_conditions(&raw["conditions"], path)?;

    let year_value = &raw["study_year"];
    let year = check_year(year_value).ok_or_else(|| invalid(path, None, "study_year", year_value))?;

    Ok(StudyMetadata {
        title: render(&raw["study_title"]),
        first_author: text_field(raw, "study_first_author", path)?,
        year,
        journal: text_field(raw, "study_journal", path)?,
        url: text_field(raw, "study_url", path)?,
        spike: render(&raw["spike"]),
        notes: render(&raw["notes"]),
        conditions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_model::ErrorKind;

    fn parse(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    const VALID: &str = "\
study_title: Mapping escape
study_first_author: Smith
study_year: 2021
study_journal: Nature
study_url: https://example.org/smith
spike: Wuhan-Hu-1
notes: |
  Multi-line
  notes.
conditions:
  C2:
    type: antibody
    subtype: clinical antibody
    year: 2020
  C1:
    type: serum
    subtype: Pfizer vaccine serum
    year: 2021
";

    #[test]
    fn test_valid_metadata() {
        let metadata = validate_metadata(&parse(VALID), Path::new("study.yml")).unwrap();
        assert_eq!(metadata.first_author, "Smith");
        assert_eq!(metadata.year, 2021);
        assert_eq!(metadata.notes, "Multi-line\nnotes.\n");
        let ids: Vec<&str> = metadata.conditions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C2", "C1"]);
        assert_eq!(
            metadata.conditions[1].descriptor.subtype,
            ConditionSubtype::PfizerVaccineSerum
        );
    }

    #[test]
    fn test_missing_notes_reports_symmetric_difference() {
        let text = VALID.replace("notes: |\n  Multi-line\n  notes.\n", "extra: 1\n");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        match err {
            EscapeError::Schema { difference, .. } => {
                assert_eq!(difference, vec!["extra".to_string(), "notes".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_mapping_root_is_schema_error() {
        let err = validate_metadata(&Value::Null, Path::new("study.yml")).unwrap_err();
        match err {
            EscapeError::Schema { difference, .. } => assert_eq!(difference.len(), 8),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_condition_field() {
        let text = VALID.replace("    subtype: clinical antibody\n", "");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        match err {
            EscapeError::MissingField {
                condition, field, ..
            } => {
                assert_eq!(condition, "C2");
                assert_eq!(field, "subtype");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serum_with_antibody_subtype_is_invalid() {
        let text = VALID.replace("Pfizer vaccine serum", "clinical antibody");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        match err {
            EscapeError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "subtype");
                assert_eq!(value, "clinical antibody");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let text = VALID.replace("type: antibody\n", "type: nanobody\n");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("nanobody"));
    }

    #[test]
    fn test_condition_year_out_of_range() {
        let text = VALID.replace("    year: 2020\n", "    year: 1999\n");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        assert!(matches!(err, EscapeError::InvalidValue { ref field, .. } if field == "year"));
    }

    #[test]
    fn test_float_year_is_invalid() {
        let text = VALID.replace("    year: 2020\n", "    year: 2020.0\n");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_study_year_checked_after_conditions() {
        let text = VALID
            .replace("study_year: 2021", "study_year: 2040")
            .replace("type: serum", "type: plasma");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        assert!(matches!(err, EscapeError::InvalidValue { ref field, .. } if field == "type"));

        let text = VALID.replace("study_year: 2021", "study_year: 2040");
        let err = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap_err();
        assert!(matches!(
            err,
            EscapeError::InvalidValue { ref field, .. } if field == "study_year"
        ));
    }

    #[test]
    fn test_numeric_condition_keys_become_text() {
        let text = VALID.replace("  C1:\n", "  2196:\n");
        let metadata = validate_metadata(&parse(&text), Path::new("study.yml")).unwrap();
        assert_eq!(metadata.conditions[1].id, "2196");
    }
}
