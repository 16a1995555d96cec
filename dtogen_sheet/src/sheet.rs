use anyhow::Context;
use dtogen_core::Record;
use flate2::read::GzDecoder;
use log::{debug, info};
use std::{fs::File, io::Read, path::Path};

/// Position of a cell in a [`Sheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub column: usize,
}

/// A grid of text cells, as read from a CSV definition sheet.
///
/// Rows can have different lengths: missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Opens the sheet at the given path.
    ///
    /// Files with a `gz` extension are decompressed on the fly.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        info!(target: "sheet", "reading definition sheet '{}'", path.display());
        let file = File::open(path)
            .with_context(|| format!("failed to open sheet file '{}'", path.display()))?;
        let sheet = if path.extension().is_some_and(|ext| ext == "gz") {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        };
        sheet.with_context(|| format!("failed to read sheet '{}'", path.display()))
    }

    /// Reads a sheet from CSV data, with no header row.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_owned).collect::<Vec<_>>())
                    .context("malformed CSV record")
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        debug!(target: "sheet", "read {} rows", rows.len());
        Ok(Self { rows })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The content of the cell, empty if outside the sheet.
    pub fn cell(&self, index: CellIndex) -> &str {
        self.rows
            .get(index.row)
            .and_then(|row| row.get(index.column))
            .map_or("", String::as_str)
    }

    /// Finds the first cell, in row-major order, whose content is exactly `label`.
    pub fn find_cell(&self, label: &str) -> Option<CellIndex> {
        self.rows.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| cell == label)
                .map(|column| CellIndex { row, column })
        })
    }

    /// The first non-empty cell to the right of the given one, on the same row.
    ///
    /// Returns the empty string if there is none.
    pub fn region_value(&self, index: CellIndex) -> &str {
        self.rows
            .get(index.row)
            .into_iter()
            .flat_map(|row| row.iter().skip(index.column + 1))
            .find(|cell| !cell.is_empty())
            .map_or("", String::as_str)
    }

    /// Extracts the table whose header row starts at the given cell.
    ///
    /// Headers run rightwards up to the first empty cell.
    /// Data rows follow directly below and end at the first row
    /// whose cells under the headers are all empty, or with the sheet.
    pub fn matrix(&self, index: CellIndex) -> Vec<Record> {
        let headers = (index.column..)
            .map(|column| self.cell(CellIndex { row: index.row, column }))
            .take_while(|header| !header.is_empty())
            .collect::<Vec<_>>();
        let records = ((index.row + 1)..self.height())
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(offset, header)| {
                        let value = self.cell(CellIndex {
                            row,
                            column: index.column + offset,
                        });
                        (*header, value)
                    })
                    .collect::<Vec<_>>()
            })
            .take_while(|cells| cells.iter().any(|(_, value)| !value.is_empty()))
            .map(Record::from_iter)
            .collect::<Vec<_>>();
        debug!(
            target: "sheet",
            "extracted {} records with {} columns from row {}",
            records.len(),
            headers.len(),
            index.row
        );
        records
    }
}
