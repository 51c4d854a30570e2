//! CWE catalog registry, loaders, and lookup engine.
//!
//! This crate provides:
//!
//! - **Catalog**: the named subsets (views) of the CWE dataset and their files
//! - **Tabular reader**: membership tests and record loading from view CSVs
//! - **Hierarchical reader**: category and view lookup in the XML catalog
//! - **Lookup engine**: [`CweDatabase`], resolving an identifier across both
//!
//! # Data Directory Structure
//!
//! ```text
//! data/database_v49/
//! ├── cwec_v4.14.xml           # Weaknesses, Categories, Views, References
//! ├── navigate_cwe/            # 699.csv, 1000.csv, 1194.csv
//! ├── external_mappings/       # 1425.csv (Top 25 2023), 1344.csv (OWASP 2021), ...
//! ├── helpful_views/           # 604.csv, 658.csv, ...
//! └── obsolete_views/          # 635.csv (used by NVD), ...
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cwe_standards::{Catalog, CweDatabase};
//!
//! let db = CweDatabase::new(Catalog::load_default());
//! let weakness = db.get("79")?;
//! println!("{}: {}", weakness.id, weakness.name);
//!
//! for entry in db.all_owasp_top_ten_2021()? {
//!     println!("{}", entry.id);
//! }
//! ```

pub mod catalog;
pub mod database;
pub mod error;
pub mod hierarchy;
pub mod paths;
pub mod tabular;

// Error types
pub use error::{CweError, Result};

// Path utilities
pub use paths::{DATA_ENV_VAR, data_root, xml_database_path};

// Catalog
pub use catalog::{
    Catalog, CatalogEntry, NavigationView, OWASP_TOP_TEN_2021, SubsetKind, TOP_25, USED_BY_NVD,
};

// Readers and engine
pub use database::CweDatabase;
pub use hierarchy::{HierarchyIndex, TaggedNode};

// Model re-exports
pub use cwe_model::{CweId, Weakness, WeaknessColumn};
