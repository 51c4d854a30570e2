//! Catalog configuration files and data file failure modes.

use std::fs;
use std::path::{Path, PathBuf};

use cwe_standards::{Catalog, CatalogEntry, CweDatabase, CweError, SubsetKind};
use tempfile::TempDir;

const HEADER: &str = "CWE-ID,Name,Weakness Abstraction,Status,Description,\n";

const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Weakness_Catalog>
  <Weaknesses/>
  <Categories>
    <Category ID="16" Name="Configuration" Status="Obsolete"><Summary>Weaknesses in this category are typically introduced during the configuration of the software.</Summary></Category>
  </Categories>
  <Views/>
  <External_References/>
</Weakness_Catalog>
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn fixture_catalog_is_sorted_into_lookup_order() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dataset");
    let catalog = Catalog::from_toml_file(&root.join("catalog.toml")).unwrap();

    let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "hardware_design",
            "research_concepts",
            "cwe_top_25_2023",
            "owasp_top_ten_2021",
            "cwe_deprecated_entries",
            "cwe_top_25_2022",
            "weaknesses_used_by_nvd",
        ]
    );

    let owasp = catalog.entry("owasp_top_ten_2021").unwrap();
    assert_eq!(owasp.kind, SubsetKind::ExternalMapping);
    assert_eq!(
        owasp.csv_url.as_deref(),
        Some("https://cwe.mitre.org/data/csv/1344.csv.zip")
    );
    assert_eq!(owasp.csv_file, root.join("external_mappings/1344.csv"));
    assert_eq!(catalog.entry("cwe_top_25_2022").unwrap().csv_url, None);
    assert_eq!(catalog.xml_file(), root.join("cwec_fixture.xml"));
}

#[test]
fn data_root_is_relative_to_the_catalog_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/views/1.csv", &format!("{HEADER}7,Seven,Base,Draft,d,\n"));
    write(dir.path(), "data/catalog.xml", XML);
    let config = write(
        dir.path(),
        "conf/catalog.toml",
        r#"
data_root = "../data"
xml_file = "catalog.xml"

[[subsets]]
name = "local"
kind = "helpful_view"
csv_file = "views/1.csv"
"#,
    );

    let db = CweDatabase::new(Catalog::from_toml_file(&config).unwrap());
    assert!(db.is_member("local", 7).unwrap());
    assert_eq!(db.get(7).unwrap().name, "Seven");
    assert_eq!(db.get(16).unwrap().status, "Obsolete");
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "catalog.toml",
        "xml_file = \"a.xml\"\nxml_version = \"4.14\"\n",
    );

    let err = Catalog::from_toml_file(&config).unwrap_err();
    assert!(matches!(err, CweError::CatalogParse { .. }));
}

#[test]
fn unknown_kind_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "catalog.toml",
        "xml_file = \"a.xml\"\n\n[[subsets]]\nname = \"x\"\nkind = \"views\"\ncsv_file = \"x.csv\"\n",
    );

    let err = Catalog::from_toml_file(&config).unwrap_err();
    assert!(matches!(err, CweError::CatalogParse { .. }));
}

#[test]
fn duplicate_subsets_are_rejected() {
    let dir = TempDir::new().unwrap();
    let subset = "[[subsets]]\nname = \"twice\"\nkind = \"obsolete_view\"\ncsv_file = \"x.csv\"\n";
    let config = write(
        dir.path(),
        "catalog.toml",
        &format!("xml_file = \"a.xml\"\n\n{subset}\n{subset}"),
    );

    let err = Catalog::from_toml_file(&config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid catalog: duplicate subset name 'twice'"
    );
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::from_toml_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CweError::Io { .. }));
}

fn single_subset_db(dir: &Path, csv: &str) -> CweDatabase {
    let csv_file = write(dir, "subset.csv", csv);
    let entry = CatalogEntry {
        name: "only".to_string(),
        kind: SubsetKind::Navigation,
        csv_url: None,
        csv_file,
    };
    CweDatabase::new(Catalog::new(vec![entry], dir.join("catalog.xml")).unwrap())
}

#[test]
fn missing_subset_file_fails_the_lookup() {
    let dir = TempDir::new().unwrap();
    let entry = CatalogEntry {
        name: "gone".to_string(),
        kind: SubsetKind::HelpfulView,
        csv_url: None,
        csv_file: dir.path().join("gone.csv"),
    };
    let db = CweDatabase::new(Catalog::new(vec![entry], dir.path().join("catalog.xml")).unwrap());

    assert!(matches!(db.get(1).unwrap_err(), CweError::Io { .. }));
    assert!(matches!(db.is_member("gone", 1).unwrap_err(), CweError::Io { .. }));
}

#[test]
fn missing_document_fails_only_the_fallback() {
    let dir = TempDir::new().unwrap();
    let db = single_subset_db(dir.path(), &format!("{HEADER}7,Seven,Base,Draft,d,\n"));

    assert_eq!(db.get(7).unwrap().name, "Seven");
    assert!(matches!(db.get(16).unwrap_err(), CweError::Io { .. }));
}

#[test]
fn failed_document_load_is_retried() {
    let dir = TempDir::new().unwrap();
    let db = single_subset_db(dir.path(), HEADER);

    assert!(matches!(db.find_by_tag(16).unwrap_err(), CweError::Io { .. }));

    write(dir.path(), "catalog.xml", XML);
    assert_eq!(db.find_by_tag(16).unwrap().unwrap().name, "Configuration");
}

#[test]
fn document_is_parsed_once_per_engine() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "catalog.xml", XML);
    let db = single_subset_db(dir.path(), HEADER);

    assert!(db.find_by_tag(16).unwrap().is_some());
    fs::remove_file(dir.path().join("catalog.xml")).unwrap();
    assert_eq!(db.get(16).unwrap().name, "Configuration");
}

#[test]
fn tabular_files_are_reread_on_every_call() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "catalog.xml", XML);
    let db = single_subset_db(dir.path(), HEADER);

    assert!(!db.is_member("only", 7).unwrap());
    write(dir.path(), "subset.csv", &format!("{HEADER}7,Seven,Base,Draft,d,\n"));
    assert!(db.is_member("only", 7).unwrap());
}
