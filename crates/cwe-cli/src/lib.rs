//! Library components of the `cwe` command-line tool.

pub mod logging;
pub mod output;
