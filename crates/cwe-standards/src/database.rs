//! Lookup engine over a [`Catalog`].

use std::path::Path;
use std::sync::OnceLock;

use cwe_model::{CweId, Weakness};

use crate::catalog::{Catalog, NavigationView, OWASP_TOP_TEN_2021, TOP_25, USED_BY_NVD};
use crate::error::{CweError, Result};
use crate::hierarchy::HierarchyIndex;
use crate::tabular;

/// Resolves identifiers against the tabular sources and the XML document
/// registered in a [`Catalog`].
///
/// Point lookups probe the tabular sources in catalog order (navigation,
/// external mappings, helpful views, obsolete views; by name within a kind)
/// and the first matching row wins. Identifiers that only exist as category
/// or view containers are resolved from the XML document, which is parsed on
/// first use and kept for the lifetime of the engine.
///
/// # Example
///
/// ```rust,ignore
/// use cwe_standards::CweDatabase;
///
/// let db = CweDatabase::open_default();
/// let weakness = db.get(15)?;
/// assert_eq!(weakness.weakness_abstraction.as_deref(), Some("Base"));
/// assert!(db.is_top_25("20")?);
/// ```
#[derive(Debug)]
pub struct CweDatabase {
    catalog: Catalog,
    hierarchy: OnceLock<HierarchyIndex>,
}

impl CweDatabase {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            hierarchy: OnceLock::new(),
        }
    }

    /// Engine over the built-in catalog of the bundled dataset.
    pub fn open_default() -> Self {
        Self::new(Catalog::load_default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve `id` to a weakness record.
    ///
    /// # Errors
    ///
    /// Returns [`CweError::InvalidCweId`] if neither a tabular source nor
    /// the categories/views of the XML document know `id`, and propagates
    /// I/O and parse failures of the data files.
    pub fn get(&self, id: impl Into<CweId>) -> Result<Weakness> {
        let id = id.into();
        let _span = tracing::debug_span!("cwe_get", id = %id).entered();

        for entry in self.catalog.entries() {
            if let Some(weakness) = tabular::find_row(&entry.csv_file, &id)? {
                tracing::debug!(subset = %entry.name, kind = %entry.kind, "Resolved from tabular source");
                return Ok(weakness);
            }
        }

        match self.find(&id)? {
            Some(weakness) => {
                tracing::debug!("Resolved from hierarchical catalog");
                Ok(weakness)
            }
            None => Err(CweError::InvalidCweId { id }),
        }
    }

    /// Resolve `id` among the categories and views of the XML document only.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be loaded, or with
    /// [`CweError::MissingDescription`] if the matched node has no child.
    pub fn find_by_tag(&self, id: impl Into<CweId>) -> Result<Option<Weakness>> {
        self.find(&id.into())
    }

    fn find(&self, id: &CweId) -> Result<Option<Weakness>> {
        self.hierarchy()?.find(id)
    }

    fn hierarchy(&self) -> Result<&HierarchyIndex> {
        if let Some(index) = self.hierarchy.get() {
            return Ok(index);
        }
        let index = HierarchyIndex::load(self.catalog.xml_file())?;
        Ok(self.hierarchy.get_or_init(|| index))
    }

    /// Whether `id` is a row of the subset `subset`.
    ///
    /// # Errors
    ///
    /// Returns [`CweError::UnknownSubset`] for unregistered names and
    /// propagates read failures of the subset file.
    pub fn is_member(&self, subset: &str, id: impl Into<CweId>) -> Result<bool> {
        tabular::exists(self.subset_file(subset)?, &id.into())
    }

    /// Every record of the subset `subset`, in file order.
    ///
    /// # Errors
    ///
    /// Same as [`CweDatabase::is_member`].
    pub fn all_of_subset(&self, subset: &str) -> Result<Vec<Weakness>> {
        tabular::all_of_category(self.subset_file(subset)?)
    }

    fn subset_file(&self, subset: &str) -> Result<&Path> {
        self.catalog.csv_file(subset)
    }

    pub fn is_navigation_member(
        &self,
        view: NavigationView,
        id: impl Into<CweId>,
    ) -> Result<bool> {
        self.is_member(view.name(), id)
    }

    pub fn all_of_navigation(&self, view: NavigationView) -> Result<Vec<Weakness>> {
        self.all_of_subset(view.name())
    }

    /// Member of the CWE Top 25 Most Dangerous Software Weaknesses (2023).
    pub fn is_top_25(&self, id: impl Into<CweId>) -> Result<bool> {
        self.is_member(TOP_25, id)
    }

    pub fn all_top_25(&self) -> Result<Vec<Weakness>> {
        self.all_of_subset(TOP_25)
    }

    /// Member of the OWASP Top Ten (2021) mapping.
    pub fn is_owasp_top_ten_2021(&self, id: impl Into<CweId>) -> Result<bool> {
        self.is_member(OWASP_TOP_TEN_2021, id)
    }

    pub fn all_owasp_top_ten_2021(&self) -> Result<Vec<Weakness>> {
        self.all_of_subset(OWASP_TOP_TEN_2021)
    }

    /// Member of the obsolete view of weaknesses used by NVD.
    pub fn is_used_by_nvd(&self, id: impl Into<CweId>) -> Result<bool> {
        self.is_member(USED_BY_NVD, id)
    }

    pub fn all_used_by_nvd(&self) -> Result<Vec<Weakness>> {
        self.all_of_subset(USED_BY_NVD)
    }
}
