//! Joining measurement rows to their conditions.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use escape_model::{
    CONDITION_COLUMN, EscapeError, JoinedRow, MEASUREMENT_COLUMNS, MeasurementRow,
    MeasurementTable, Result, parse_escape_value,
};

use crate::conditions::ConditionTable;

/// Paths of the two study files, used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct JoinSources<'a> {
    pub metadata: &'a Path,
    pub measurements: &'a Path,
}

fn require_column(table: &MeasurementTable, column: &str, path: &Path) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| EscapeError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn check_referential_integrity(
    conditions: &ConditionTable,
    table: &MeasurementTable,
    condition_idx: usize,
    sources: JoinSources<'_>,
) -> Result<()> {
    let measured = table.distinct_values(condition_idx);
    let defined = conditions.ids();
    if measured != defined {
        return Err(EscapeError::ReferentialIntegrity {
            metadata: sources.metadata.to_path_buf(),
            data: sources.measurements.to_path_buf(),
            difference: measured
                .symmetric_difference(&defined)
                .map(|id| (*id).to_string())
                .collect(),
        });
    }
    Ok(())
}

/// Joins each measurement row to exactly one condition.
///
/// Output rows follow the condition table order; rows of one condition keep
/// their file order. Measurement columns other than the required five are
/// dropped.
///
/// # Errors
///
/// - [`EscapeError::MissingColumn`] if `condition` or another required column is absent
/// - [`EscapeError::ReferentialIntegrity`] if the condition sets differ
/// - [`EscapeError::JoinInvariant`] if an identifier matches several conditions
/// - [`EscapeError::InvalidValue`] if a `mut_escape` cell is not numeric
pub fn join_measurements(
    conditions: &ConditionTable,
    table: &MeasurementTable,
    sources: JoinSources<'_>,
) -> Result<Vec<JoinedRow>> {
    let path = sources.measurements;
    let condition_idx = require_column(table, CONDITION_COLUMN, path)?;
    check_referential_integrity(conditions, table, condition_idx, sources)?;

    let mut indices = [0usize; MEASUREMENT_COLUMNS.len()];
    for (slot, column) in indices.iter_mut().zip(MEASUREMENT_COLUMNS) {
        *slot = require_column(table, column, path)?;
    }
    let [condition_idx, site_idx, wildtype_idx, mutation_idx, escape_idx] = indices;

    // Bucket row numbers by condition so output can follow condition order.
    let mut buckets: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let id = row.get(condition_idx).map(String::as_str).unwrap_or("");
        buckets.entry(id).or_default().push(row_idx);
    }
    for id in buckets.keys() {
        let matches = conditions.positions(id).len();
        if matches != 1 {
            return Err(EscapeError::JoinInvariant {
                path: path.to_path_buf(),
                condition: (*id).to_string(),
                matches,
            });
        }
    }

    let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();
    let mut joined = Vec::with_capacity(table.len());
    for condition in conditions.iter() {
        let Some(rows) = buckets.get(condition.id.as_str()) else {
            continue;
        };
        for &row_idx in rows {
            let row = table.rows[row_idx].as_slice();
            let raw_escape = cell(row, escape_idx);
            let mut_escape =
                parse_escape_value(&raw_escape).map_err(|_| EscapeError::InvalidValue {
                    path: path.to_path_buf(),
                    location: Some(format!("data row {}", row_idx + 1)),
                    field: "mut_escape".to_string(),
                    value: raw_escape.clone(),
                })?;
            joined.push(JoinedRow {
                descriptor: condition.descriptor,
                measurement: MeasurementRow {
                    condition: condition.id.clone(),
                    site: cell(row, site_idx),
                    wildtype: cell(row, wildtype_idx),
                    mutation: cell(row, mutation_idx),
                    mut_escape,
                },
            });
        }
    }

    debug_assert_eq!(joined.len(), table.len());
    debug!(
        path = %path.display(),
        conditions = conditions.len(),
        rows = joined.len(),
        "joined measurements"
    );
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_model::{Condition, ConditionDescriptor, ConditionSubtype, ConditionType, ErrorKind};

    fn conditions(ids: &[&str]) -> ConditionTable {
        ConditionTable::new(
            ids.iter()
                .map(|id| Condition {
                    id: (*id).to_string(),
                    descriptor: ConditionDescriptor {
                        condition_type: ConditionType::Antibody,
                        subtype: ConditionSubtype::ClinicalAntibody,
                        year: 2020,
                    },
                })
                .collect(),
        )
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> MeasurementTable {
        MeasurementTable::new(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        )
    }

    fn sources() -> JoinSources<'static> {
        JoinSources {
            metadata: Path::new("study.yml"),
            measurements: Path::new("data.csv"),
        }
    }

    const HEADERS: &[&str] = &["condition", "site", "wildtype", "mutation", "mut_escape"];

    #[test]
    fn test_join_orders_by_condition_table() {
        let data = table(
            HEADERS,
            &[
                &["C1", "331", "N", "A", "0.1"],
                &["C2", "331", "N", "D", "0.2"],
                &["C1", "332", "I", "V", ""],
            ],
        );
        let joined = join_measurements(&conditions(&["C2", "C1"]), &data, sources()).unwrap();
        let order: Vec<(&str, &str)> = joined
            .iter()
            .map(|r| (r.measurement.condition.as_str(), r.measurement.mutation.as_str()))
            .collect();
        assert_eq!(order, vec![("C2", "D"), ("C1", "A"), ("C1", "V")]);
        assert_eq!(joined[2].measurement.mut_escape, None);
    }

    #[test]
    fn test_missing_condition_column() {
        let data = table(&["site"], &[&["331"]]);
        let err = join_measurements(&conditions(&["C1"]), &data, sources()).unwrap_err();
        match err {
            EscapeError::MissingColumn { column, .. } => assert_eq!(column, "condition"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_condition_in_measurements() {
        let data = table(
            HEADERS,
            &[&["C1", "331", "N", "A", "0.1"], &["C3", "331", "N", "A", "0.1"]],
        );
        let err = join_measurements(&conditions(&["C1", "C2"]), &data, sources()).unwrap_err();
        match err {
            EscapeError::ReferentialIntegrity { difference, .. } => {
                assert_eq!(difference, vec!["C2".to_string(), "C3".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_integrity_checked_before_other_columns() {
        let data = table(&["condition", "site"], &[&["C9", "331"]]);
        let err = join_measurements(&conditions(&["C1"]), &data, sources()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferentialIntegrity);

        let data = table(&["condition", "site"], &[&["C1", "331"]]);
        let err = join_measurements(&conditions(&["C1"]), &data, sources()).unwrap_err();
        match err {
            EscapeError::MissingColumn { column, .. } => assert_eq!(column, "wildtype"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_colliding_identifiers_violate_join_invariant() {
        let data = table(HEADERS, &[&["1", "331", "N", "A", "0.1"]]);
        let err = join_measurements(&conditions(&["1", "1"]), &data, sources()).unwrap_err();
        assert!(matches!(err, EscapeError::JoinInvariant { matches: 2, .. }));
    }

    #[test]
    fn test_non_numeric_escape() {
        let data = table(HEADERS, &[&["C1", "331", "N", "A", "high"]]);
        let err = join_measurements(&conditions(&["C1"]), &data, sources()).unwrap_err();
        match err {
            EscapeError::InvalidValue {
                field, location, ..
            } => {
                assert_eq!(field, "mut_escape");
                assert_eq!(location.as_deref(), Some("data row 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_columns_dropped() {
        let data = table(
            &["mut_escape", "extra", "mutation", "wildtype", "site", "condition"],
            &[&["0.5", "x", "K", "E", "484", "C1"]],
        );
        let joined = join_measurements(&conditions(&["C1"]), &data, sources()).unwrap();
        assert_eq!(joined[0].measurement.site, "484");
        assert_eq!(joined[0].measurement.wildtype, "E");
        assert_eq!(joined[0].measurement.mut_escape, Some(0.5));
    }
}
