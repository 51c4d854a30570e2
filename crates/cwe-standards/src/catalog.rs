//! Registry of named CWE subsets and the files backing them.
//!
//! MITRE publishes every view as its own CSV download. The bundled dataset
//! keeps one file per view, grouped into four directories by
//! [`SubsetKind`]. A [`Catalog`] maps each subset name to its file and fixes
//! the order in which the lookup engine probes them.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CweError, Result};
use crate::paths::{XML_FILE_NAME, data_root};

/// Catalog name of the CWE Top 25 (2023) external mapping.
pub const TOP_25: &str = "cwe_top_25_2023";
/// Catalog name of the OWASP Top Ten (2021) external mapping.
pub const OWASP_TOP_TEN_2021: &str = "owasp_top_ten_2021";
/// Catalog name of the obsolete "Weaknesses Used by NVD" view.
pub const USED_BY_NVD: &str = "weaknesses_used_by_nvd";

const CSV_URL_BASE: &str = "https://cwe.mitre.org/data/csv";

const NAVIGATION: &[(&str, u32)] = &[
    ("software_development", 699),
    ("hardware_design", 1194),
    ("research_concepts", 1000),
];

const EXTERNAL_MAPPINGS: &[(&str, u32)] = &[
    ("cwe_top_25_2023", 1425),
    ("most_important_hardware_weaknesses_2021", 1343),
    ("owasp_top_ten_2021", 1344),
    ("seven_pernicious_kingdoms", 700),
    ("software_fault_pattern_clusters", 888),
    ("sei_cert_oracle_coding_standard_for_java", 1133),
    ("sei_cert_c_coding_standard", 1154),
    ("sei_cert_perl_coding_standard", 1178),
    ("addressed_by_ISA/IEC_62443_requirements", 1424),
    ("cisq_quality_measures_2020", 1305),
    ("cisq_data_protection_measures", 1340),
    ("sei_etf_security_vulnerabilities_in ICS", 1358),
    ("architectural_concepts", 1008),
];

const HELPFUL_VIEWS: &[(&str, u32)] = &[
    ("introduced_during_design", 701),
    ("introduced_during_implementation", 702),
    ("software_assurance_trends_categorization", 1400),
    ("quality_weaknesses_with_indirect_security_impacts", 1040),
    ("software_written_in_c", 658),
    ("software_written_in_c++", 659),
    ("software_written_in_java", 660),
    ("software_written_in_php", 661),
    ("weaknesses_in_mobile_applications", 919),
    ("cwe_composites", 678),
    ("cwe_named_chains", 709),
    ("cwe_cross_section", 884),
    ("cwe_simplified_mapping", 1003),
    ("cwe_entries_with_maintenance_notes", 1081),
    ("cwe_deprecated_entries", 604),
    ("cwe_comprehensive_view", 2000),
    ("weakness_base_elements", 677),
];

const OBSOLETE_VIEWS: &[(&str, u32)] = &[
    ("cwe_top_25_2022", 1387),
    ("cwe_top_25_2021", 1337),
    ("cwe_top_25_2020", 1350),
    ("cwe_top_25_2019", 1200),
    ("cwe/sans_top_25_2011", 900),
    ("cwe/sans_top_25_2010", 800),
    ("cwe/sans_top_25_2009", 750),
    ("weaknesses_used_by_nvd", 635),
    ("owasp_top_ten_2017", 1026),
    ("owasp_top_ten_2013", 928),
    ("owasp_top_10_2010", 809),
    ("owasp_top_10_2007", 629),
    ("owasp_top_10_2004", 711),
    ("the_cert_c_secure_coding_standard_2008", 734),
    ("the_cert_oracle_secure_coding_standard_for_java_2011", 844),
    ("sei_cert_c++_coding_standard_2016", 868),
    ("cisq_quality_measures_2016", 1128),
];

/// Grouping of a subset. Declaration order is the lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsetKind {
    /// Navigation hierarchies (software development, hardware design,
    /// research concepts).
    Navigation,
    /// Mappings to external standards and top-N lists.
    ExternalMapping,
    /// Curated helpful views.
    HelpfulView,
    /// Obsolete and historical views.
    ObsoleteView,
}

impl SubsetKind {
    /// All kinds in lookup order.
    pub const ALL: [SubsetKind; 4] = [
        Self::Navigation,
        Self::ExternalMapping,
        Self::HelpfulView,
        Self::ObsoleteView,
    ];

    /// Directory holding this kind's files in the bundled dataset.
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::Navigation => "navigate_cwe",
            Self::ExternalMapping => "external_mappings",
            Self::HelpfulView => "helpful_views",
            Self::ObsoleteView => "obsolete_views",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::ExternalMapping => "external_mapping",
            Self::HelpfulView => "helpful_view",
            Self::ObsoleteView => "obsolete_view",
        }
    }

    fn builtin_views(&self) -> &'static [(&'static str, u32)] {
        match self {
            Self::Navigation => NAVIGATION,
            Self::ExternalMapping => EXTERNAL_MAPPINGS,
            Self::HelpfulView => HELPFUL_VIEWS,
            Self::ObsoleteView => OBSOLETE_VIEWS,
        }
    }
}

impl fmt::Display for SubsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubsetKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "navigation" | "navigate_cwe" => Ok(Self::Navigation),
            "external_mapping" | "external_mappings" => Ok(Self::ExternalMapping),
            "helpful_view" | "helpful_views" => Ok(Self::HelpfulView),
            "obsolete_view" | "obsolete_views" => Ok(Self::ObsoleteView),
            _ => Err(format!("Unknown subset kind: {s}")),
        }
    }
}

/// The three top-level navigation trees of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationView {
    HardwareDesign,
    ResearchConcepts,
    SoftwareDevelopment,
}

impl NavigationView {
    pub const ALL: [NavigationView; 3] = [
        Self::HardwareDesign,
        Self::ResearchConcepts,
        Self::SoftwareDevelopment,
    ];

    /// Catalog name of the view.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HardwareDesign => "hardware_design",
            Self::ResearchConcepts => "research_concepts",
            Self::SoftwareDevelopment => "software_development",
        }
    }
}

impl fmt::Display for NavigationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One registered subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub kind: SubsetKind,
    /// Upstream download location. Informational only, never fetched.
    pub csv_url: Option<String>,
    pub csv_file: PathBuf,
}

/// Registry of subsets plus the location of the XML document.
///
/// Entries are kept in lookup order: by [`SubsetKind`] declaration order,
/// then lexicographically by name.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    xml_file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    data_root: Option<PathBuf>,
    xml_file: PathBuf,
    #[serde(default)]
    subsets: Vec<SubsetFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubsetFile {
    name: String,
    kind: SubsetKind,
    csv_url: Option<String>,
    csv_file: PathBuf,
}

impl Catalog {
    /// Build a catalog from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`CweError::InvalidCatalog`] if two entries share a name.
    pub fn new(entries: Vec<CatalogEntry>, xml_file: impl Into<PathBuf>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CweError::InvalidCatalog {
                    message: format!("duplicate subset name '{}'", entry.name),
                });
            }
        }
        Ok(Self::sorted(entries, xml_file.into()))
    }

    /// The catalog of the bundled dataset, rooted at `root`.
    pub fn builtin(root: &Path) -> Self {
        let entries = SubsetKind::ALL
            .into_iter()
            .flat_map(|kind| {
                kind.builtin_views()
                    .iter()
                    .map(move |(name, view)| CatalogEntry {
                        name: (*name).to_string(),
                        kind,
                        csv_url: Some(format!("{CSV_URL_BASE}/{view}.csv.zip")),
                        csv_file: root.join(kind.dir_name()).join(format!("{view}.csv")),
                    })
            })
            .collect();
        Self::sorted(entries, root.join(XML_FILE_NAME))
    }

    /// The built-in catalog rooted at [`data_root`].
    pub fn load_default() -> Self {
        Self::builtin(&data_root())
    }

    /// Load a catalog from a TOML file.
    ///
    /// `data_root` in the file is resolved against the file's directory;
    /// `xml_file` and every `csv_file` against `data_root`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, or registers
    /// the same subset name twice.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CweError::io(path, e))?;
        let file: CatalogFile = toml::from_str(&contents).map_err(|e| CweError::CatalogParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let root = match &file.data_root {
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        };

        let entries = file
            .subsets
            .into_iter()
            .map(|subset| CatalogEntry {
                name: subset.name,
                kind: subset.kind,
                csv_url: subset.csv_url,
                csv_file: root.join(subset.csv_file),
            })
            .collect();

        let catalog = Self::new(entries, root.join(&file.xml_file))?;
        tracing::debug!(
            path = %path.display(),
            subsets = catalog.entries.len(),
            "Loaded catalog configuration"
        );
        Ok(catalog)
    }

    fn sorted(mut entries: Vec<CatalogEntry>, xml_file: PathBuf) -> Self {
        entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        Self { entries, xml_file }
    }

    /// All entries in lookup order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_of_kind(&self, kind: SubsetKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// File backing the subset `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CweError::UnknownSubset`] if no such subset is registered.
    pub fn csv_file(&self, name: &str) -> Result<&Path> {
        self.entry(name)
            .map(|entry| entry.csv_file.as_path())
            .ok_or_else(|| CweError::UnknownSubset {
                name: name.to_string(),
            })
    }

    pub fn xml_file(&self) -> &Path {
        &self.xml_file
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
