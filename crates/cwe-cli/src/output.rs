//! Table and JSON rendering of lookup results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ColumnConstraint, ContentArrangement, Table, Width};
use cwe_model::{Weakness, WeaknessColumn};
use cwe_standards::CatalogEntry;
use serde::Serialize;

/// Shown for a record that carries no abstraction tier.
pub const NO_ABSTRACTION: &str = "-";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per column of `weakness`. Empty cells are left out, except for
/// the identifying columns.
pub fn weakness_table(weakness: &Weakness) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    apply_table_style(&mut table);
    table.set_constraints(vec![ColumnConstraint::UpperBoundary(Width::Fixed(24))]);

    for column in WeaknessColumn::ALL {
        let value = weakness.get(column).unwrap_or(NO_ABSTRACTION);
        let always = matches!(
            column,
            WeaknessColumn::CweId
                | WeaknessColumn::Name
                | WeaknessColumn::WeaknessAbstraction
                | WeaknessColumn::Status
        );
        if always || !value.is_empty() {
            table.add_row(vec![column.header(), value]);
        }
    }
    table
}

/// Summary listing of a subset, in file order.
pub fn subset_table(weaknesses: &[Weakness]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["CWE-ID", "Name", "Abstraction", "Status"]);
    apply_table_style(&mut table);
    for weakness in weaknesses {
        table.add_row(vec![
            weakness.id.as_str(),
            weakness.name.as_str(),
            weakness
                .weakness_abstraction
                .as_deref()
                .unwrap_or(NO_ABSTRACTION),
            weakness.status.as_str(),
        ]);
    }
    table
}

/// Catalog entries, in the order given.
pub fn catalog_table<'a>(entries: impl IntoIterator<Item = &'a CatalogEntry>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Subset", "File"]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            entry.kind.to_string(),
            entry.name.clone(),
            entry.csv_file.display().to_string(),
        ]);
    }
    table
}

/// Pretty-printed JSON.
///
/// # Errors
///
/// Propagates serialization failures.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwe_standards::{Catalog, SubsetKind};
    use std::path::Path;

    fn category() -> Weakness {
        Weakness {
            id: "399".to_string(),
            name: "Resource Management Errors".to_string(),
            status: "Draft".to_string(),
            description: "Weaknesses in this category are related to improper management of system resources.".to_string(),
            ..Weakness::default()
        }
    }

    fn first_cells(table: &Table) -> Vec<String> {
        table
            .row_iter()
            .filter_map(|row| row.cell_iter().next().map(comfy_table::Cell::content))
            .collect()
    }

    #[test]
    fn record_table_skips_empty_columns() {
        let table = weakness_table(&category());
        assert_eq!(
            first_cells(&table),
            [
                "CWE-ID",
                "Name",
                "Weakness Abstraction",
                "Status",
                "Description"
            ]
        );
    }

    #[test]
    fn subset_table_has_a_row_per_record() {
        let mut other = category();
        other.id = "400".to_string();
        other.weakness_abstraction = Some("Class".to_string());

        let table = subset_table(&[category(), other]);
        assert_eq!(first_cells(&table), ["399", "400"]);
    }

    #[test]
    fn catalog_table_follows_lookup_order() {
        let catalog = Catalog::builtin(Path::new("/data"));
        let table = catalog_table(catalog.entries());
        assert_eq!(table.row_iter().count(), catalog.len());
        let kinds = first_cells(&table);
        assert_eq!(kinds.first().map(String::as_str), Some("navigation"));
        assert_eq!(kinds.last().map(String::as_str), Some("obsolete_view"));
    }

    #[test]
    fn catalog_table_of_one_kind() {
        let catalog = Catalog::builtin(Path::new("/data"));
        let table = catalog_table(catalog.entries_of_kind(SubsetKind::Navigation));
        assert_eq!(first_cells(&table), ["navigation"; 3]);
    }

    #[test]
    fn json_keeps_absent_abstraction_as_null() {
        let json = to_json(&category()).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "id": "399",
          "name": "Resource Management Errors",
          "weakness_abstraction": null,
          "status": "Draft",
          "description": "Weaknesses in this category are related to improper management of system resources.",
          "extended_description": "",
          "related_weaknesses": "",
          "weakness_ordinalities": "",
          "applicable_platforms": "",
          "background_details": "",
          "alternate_terms": "",
          "modes_of_introduction": "",
          "exploitation_factors": "",
          "likelihood_of_exploit": "",
          "common_consequences": "",
          "detection_methods": "",
          "potential_mitigations": "",
          "observed_examples": "",
          "functional_areas": "",
          "affected_resources": "",
          "taxonomy_mappings": "",
          "related_attack_patterns": "",
          "notes": ""
        }
        "#);
    }
}
