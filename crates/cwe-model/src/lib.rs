//! CWE data model definitions.
//!
//! - [`Weakness`]: one catalog entry, with fields in upstream CSV column order
//! - [`WeaknessColumn`]: the column schema of the tabular catalog files
//! - [`CweId`]: the identifier accepted by every lookup

pub mod id;
pub mod weakness;

pub use id::CweId;
pub use weakness::{UnknownColumn, Weakness, WeaknessColumn};
