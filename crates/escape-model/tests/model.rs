//! Tests for escape-model types.

use escape_model::{
    Condition, ConditionDescriptor, ConditionSubtype, ConditionType, EnrichedRow, JoinedRow,
    MeasurementRow,
};

fn joined(condition: &str, condition_type: ConditionType) -> JoinedRow {
    JoinedRow {
        descriptor: ConditionDescriptor {
            condition_type,
            subtype: ConditionSubtype::NotClinicalAntibody,
            year: 2021,
        },
        measurement: MeasurementRow {
            condition: condition.to_string(),
            site: "484".to_string(),
            wildtype: "E".to_string(),
            mutation: "K".to_string(),
            mut_escape: Some(0.5),
        },
    }
}

#[test]
fn tag_attaches_study() {
    let row: EnrichedRow = joined("C1", ConditionType::Antibody).tag("2021_Smith_A");
    assert_eq!(row.study, "2021_Smith_A");
    assert_eq!(row.condition(), "C1");
    assert_eq!(row.condition_type(), ConditionType::Antibody);
}

#[test]
fn condition_serializes_with_metadata_spelling() {
    let condition = Condition {
        id: "REGN10987".to_string(),
        descriptor: ConditionDescriptor {
            condition_type: ConditionType::AntibodyCocktail,
            subtype: ConditionSubtype::ClinicalAntibody,
            year: 2020,
        },
    };
    let json = serde_json::to_value(&condition).expect("serialize condition");
    assert_eq!(json["id"], "REGN10987");
    assert_eq!(json["type"], "antibody cocktail");
    assert_eq!(json["subtype"], "clinical antibody");
    assert_eq!(json["year"], 2020);

    let round: Condition = serde_json::from_value(json).expect("deserialize condition");
    assert_eq!(round, condition);
}

#[test]
fn only_cocktails_are_excluded() {
    assert!(ConditionType::AntibodyCocktail.is_excluded_from_output());
    assert!(!ConditionType::Antibody.is_excluded_from_output());
    assert!(!ConditionType::Serum.is_excluded_from_output());
}
