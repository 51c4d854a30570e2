//! CWE identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry.
///
/// Callers may pass an integer or a string. Integers are rendered to their
/// decimal form; strings are kept exactly as given, so `"015"` and `15` are
/// different identifiers. All comparisons against catalog data use
/// [`CweId::as_str`].
///
/// # Example
///
/// ```
/// use cwe_model::CweId;
///
/// assert_eq!(CweId::from(15), CweId::from("15"));
/// assert_eq!(CweId::from(1000000).to_string(), "1000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CweId(String);

impl CweId {
    /// The textual form used for matching.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CweId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CweId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CweId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CweId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for CweId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&CweId> for CweId {
    fn from(value: &CweId) -> Self {
        value.clone()
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CweId {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(u16, u32, u64, usize, i32, i64);
