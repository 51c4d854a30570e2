//! Data directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the data directory.
pub const DATA_ENV_VAR: &str = "CWE_DATA_DIR";

/// Dataset release bundled with the workspace.
pub const DATASET_VERSION: &str = "database_v49";

/// File name of the hierarchical catalog document inside the data root.
pub const XML_FILE_NAME: &str = "cwec_v4.14.xml";

/// Get the data root directory.
///
/// Resolution order:
/// 1. `CWE_DATA_DIR` environment variable
/// 2. `data/database_v49/` directory relative to workspace root
///
/// # Example
///
/// ```rust,ignore
/// let root = cwe_standards::data_root();
/// let top_25 = root.join("external_mappings/1425.csv");
/// ```
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(DATASET_VERSION)
}

/// Path of the XML document under the data root.
pub fn xml_database_path() -> PathBuf {
    data_root().join(XML_FILE_NAME)
}
