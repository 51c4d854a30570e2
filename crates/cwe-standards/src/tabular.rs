//! Tabular (CSV) source reader.
//!
//! Every call opens the file afresh and streams it in row order, so no read
//! position survives between calls.
//!
//! # File layout
//!
//! The upstream downloads terminate every line with a comma, which yields an
//! unnamed trailer column. Columns are bound to [`Weakness`] fields by header
//! name: the blank trailer and any header outside [`WeaknessColumn::ALL`] are
//! not carried into the record. Cell text is stored verbatim.

use std::fs::File;
use std::path::Path;

use csv::{Reader, StringRecord};
use cwe_model::{CweId, Weakness, WeaknessColumn};

use crate::error::{CweError, Result};

/// Header of the identifier column.
pub const ID_COLUMN: &str = WeaknessColumn::CweId.header();

/// Column binding derived from a file's header row.
#[derive(Debug)]
struct HeaderLayout {
    id_index: usize,
    columns: Vec<Option<WeaknessColumn>>,
}

impl HeaderLayout {
    /// `Ok(None)` for an empty file.
    fn read(reader: &mut Reader<File>, path: &Path) -> Result<Option<Self>> {
        let headers = reader.headers().map_err(|e| CweError::csv(path, e))?;
        if headers.is_empty() {
            return Ok(None);
        }

        let columns: Vec<Option<WeaknessColumn>> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let header = if idx == 0 {
                    header.trim_start_matches('\u{feff}')
                } else {
                    header
                };
                WeaknessColumn::from_header(header)
            })
            .collect();

        let excluded: Vec<&str> = headers
            .iter()
            .zip(&columns)
            .filter(|(_, column)| column.is_none())
            .map(|(header, _)| header)
            .collect();
        if !excluded.is_empty() {
            tracing::trace!(
                file = %path.display(),
                excluded = ?excluded,
                "Columns not carried into weakness records"
            );
        }

        let id_index = columns
            .iter()
            .position(|column| *column == Some(WeaknessColumn::CweId))
            .ok_or_else(|| CweError::MissingColumn {
                column: ID_COLUMN,
                path: path.to_path_buf(),
            })?;

        Ok(Some(Self { id_index, columns }))
    }

    fn matches(&self, record: &StringRecord, id: &CweId) -> bool {
        record.get(self.id_index) == Some(id.as_str())
    }

    fn build(&self, record: &StringRecord) -> Weakness {
        let mut weakness = Weakness::default();
        for (value, column) in record.iter().zip(&self.columns) {
            if let Some(column) = column {
                weakness.set(*column, value);
            }
        }
        weakness
    }
}

fn open(path: &Path) -> Result<Reader<File>> {
    let file = File::open(path).map_err(|e| CweError::io(path, e))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

/// Scan `path` for the first row whose identifier matches `id`.
fn scan(path: &Path, id: &CweId) -> Result<Option<(HeaderLayout, StringRecord)>> {
    let mut reader = open(path)?;
    let Some(layout) = HeaderLayout::read(&mut reader, path)? else {
        return Ok(None);
    };

    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .map_err(|e| CweError::csv(path, e))?
    {
        if layout.matches(&record, id) {
            return Ok(Some((layout, record)));
        }
    }
    Ok(None)
}

/// Whether `id` appears as a row of the file at `path`.
///
/// Comparison is string equality against the verbatim `CWE-ID` cell.
/// An empty file contains nothing.
///
/// # Errors
///
/// Fails if the file cannot be opened or is not valid CSV, or if its header
/// has no `CWE-ID` column.
pub fn exists(path: &Path, id: &CweId) -> Result<bool> {
    Ok(scan(path, id)?.is_some())
}

/// Build the record for the first row matching `id`.
///
/// # Errors
///
/// Same as [`exists`].
pub fn find_row(path: &Path, id: &CweId) -> Result<Option<Weakness>> {
    Ok(scan(path, id)?.map(|(layout, record)| layout.build(&record)))
}

/// Every row of the file as a [`Weakness`], in file order.
///
/// # Errors
///
/// Same as [`exists`].
pub fn all_of_category(path: &Path) -> Result<Vec<Weakness>> {
    let mut reader = open(path)?;
    let Some(layout) = HeaderLayout::read(&mut reader, path)? else {
        return Ok(Vec::new());
    };

    let mut weaknesses = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CweError::csv(path, e))?;
        weaknesses.push(layout.build(&record));
    }

    tracing::debug!(
        file = %path.display(),
        count = weaknesses.len(),
        "Loaded weaknesses from tabular source"
    );
    Ok(weaknesses)
}
