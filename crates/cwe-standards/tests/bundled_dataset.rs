//! Checks against the full bundled dataset.
//!
//! The dataset is not part of the source tree. These tests return early when
//! the data root (see `CWE_DATA_DIR`) does not hold it.

use cwe_standards::{CweDatabase, xml_database_path};

fn bundled_db() -> Option<CweDatabase> {
    if !xml_database_path().exists() {
        eprintln!(
            "skipping: no dataset at {}",
            xml_database_path().display()
        );
        return None;
    }
    Some(CweDatabase::open_default())
}

#[test]
fn external_control_of_configuration_setting() {
    let Some(db) = bundled_db() else { return };
    let weakness = db.get(15).unwrap();

    assert_eq!(
        weakness.name,
        "External Control of System or Configuration Setting"
    );
    assert_eq!(weakness.weakness_abstraction.as_deref(), Some("Base"));
    assert_eq!(weakness.status, "Incomplete");
    assert_eq!(
        weakness.related_attack_patterns,
        "::13::146::176::203::270::271::69::76::77::"
    );
}

#[test]
fn deprecated_and_obsolete_entries() {
    let Some(db) = bundled_db() else { return };

    let deprecated = db.get("3").unwrap();
    assert_eq!(
        deprecated.name,
        "DEPRECATED: Technology-specific Environment Issues"
    );
    assert_eq!(deprecated.status, "Deprecated");

    assert_eq!(db.get(264).unwrap().status, "Obsolete");
}

#[test]
fn structural_entries() {
    let Some(db) = bundled_db() else { return };

    let view = db.get("1008").unwrap();
    assert_eq!(view.name, "Architectural Concepts");
    assert_eq!(view.status, "Incomplete");

    let category = db.find_by_tag(399).unwrap().unwrap();
    assert_eq!(category.name, "Resource Management Errors");
    assert_eq!(category.status, "Draft");
    assert_eq!(
        category.description,
        "Weaknesses in this category are related to improper management of system resources."
    );
}

#[test]
fn named_subset_sizes() {
    let Some(db) = bundled_db() else { return };

    assert_eq!(db.all_top_25().unwrap().len(), 25);
    assert_eq!(db.all_owasp_top_ten_2021().unwrap().len(), 182);
    assert_eq!(db.all_used_by_nvd().unwrap().len(), 13);

    assert!(db.is_owasp_top_ten_2021(11).unwrap());
    assert!(db.is_used_by_nvd(352).unwrap());
}
