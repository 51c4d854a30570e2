//! Error types for catalog loading and lookups.

use std::path::PathBuf;

use cwe_model::CweId;
use thiserror::Error;

/// Errors that can occur while resolving CWE identifiers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CweError {
    /// Identifier not present in any tabular source nor in the
    /// categories/views of the XML document.
    #[error("Invalid CWE ID {id}")]
    InvalidCweId { id: CweId },

    /// Data file missing or unreadable.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed tabular file.
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Tabular file header without the identifier column.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// Malformed XML document.
    #[error("failed to parse XML {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    /// Text or entity in the XML document that cannot be decoded.
    #[error("failed to decode XML text in {path}: {message}")]
    XmlText { path: PathBuf, message: String },

    /// XML root has fewer top-level sections than expected.
    #[error("XML document {path} has no top-level section at index {index}")]
    MissingSection { index: usize, path: PathBuf },

    /// Matched category/view node has no child element to describe it.
    #[error("node {id} in {path} has no child element (index out of range)")]
    MissingDescription { id: CweId, path: PathBuf },

    /// Subset name not registered in the catalog.
    #[error("unknown subset: {name}")]
    UnknownSubset { name: String },

    /// Catalog configuration file is not valid TOML.
    #[error("failed to parse catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Catalog configuration is inconsistent.
    #[error("invalid catalog: {message}")]
    InvalidCatalog { message: String },
}

impl CweError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn xml(path: impl Into<PathBuf>, source: quick_xml::Error) -> Self {
        Self::Xml {
            path: path.into(),
            source,
        }
    }

    /// True for the "identifier not found anywhere" outcome.
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidCweId { .. })
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CweError>;
