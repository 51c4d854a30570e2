//! Tests for cwe-model types.

use cwe_model::{Weakness, WeaknessColumn};

#[test]
fn column_headers_round_trip() {
    for column in WeaknessColumn::ALL {
        assert_eq!(WeaknessColumn::from_header(column.header()), Some(column));
        assert_eq!(column.header().parse::<WeaknessColumn>().unwrap(), column);
    }
}

#[test]
fn column_order_starts_with_identity_fields() {
    let headers: Vec<&str> = WeaknessColumn::ALL
        .iter()
        .take(4)
        .map(WeaknessColumn::header)
        .collect();
    assert_eq!(
        headers,
        vec!["CWE-ID", "Name", "Weakness Abstraction", "Status"]
    );
    assert_eq!(WeaknessColumn::ALL.last(), Some(&WeaknessColumn::Notes));
}

#[test]
fn unknown_and_blank_headers_are_rejected() {
    assert_eq!(WeaknessColumn::from_header(""), None);
    assert_eq!(WeaknessColumn::from_header("cwe-id"), None);
    let err = "Mapping Notes".parse::<WeaknessColumn>().unwrap_err();
    assert_eq!(err.to_string(), "unknown weakness column: Mapping Notes");
}

#[test]
fn set_and_get_are_verbatim() {
    let mut weakness = Weakness::default();
    weakness.set(WeaknessColumn::CweId, "15");
    weakness.set(WeaknessColumn::RelatedAttackPatterns, "::13::146::");
    weakness.set(WeaknessColumn::ExtendedDescription, "  padded  ");

    assert_eq!(weakness.id, "15");
    assert_eq!(
        weakness.get(WeaknessColumn::RelatedAttackPatterns),
        Some("::13::146::")
    );
    assert_eq!(weakness.extended_description, "  padded  ");
}

#[test]
fn abstraction_is_absent_until_set() {
    let mut weakness = Weakness::default();
    assert_eq!(weakness.get(WeaknessColumn::WeaknessAbstraction), None);

    weakness.set(WeaknessColumn::WeaknessAbstraction, "");
    assert_eq!(weakness.weakness_abstraction.as_deref(), Some(""));
}

#[test]
fn values_follow_column_order() {
    let mut weakness = Weakness::default();
    for (idx, column) in WeaknessColumn::ALL.into_iter().enumerate() {
        weakness.set(column, format!("v{idx}"));
    }
    let values: Vec<&str> = weakness.values().collect();
    assert_eq!(values.len(), 23);
    assert_eq!(values[0], "v0");
    assert_eq!(values[2], "v2");
    assert_eq!(values[22], "v22");
}

#[test]
fn weakness_serializes() {
    let weakness = Weakness {
        id: "1008".to_string(),
        name: "Architectural Concepts".to_string(),
        status: "Incomplete".to_string(),
        ..Weakness::default()
    };
    let json = serde_json::to_value(&weakness).expect("serialize weakness");
    assert_eq!(json["id"], "1008");
    assert!(json["weakness_abstraction"].is_null());

    let round: Weakness = serde_json::from_value(json).expect("deserialize weakness");
    assert_eq!(round, weakness);
}
