//! Untyped tabular input as read from delimited text.

use std::io::Read;

use edo_core::errors::{EdoError, ErrorInfo};

/// Header plus string cells; empty cells are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Column names exactly as supplied.
    pub header: Vec<String>,
    /// Row cells aligned with `header`.
    pub rows: Vec<Vec<Option<String>>>,
}

fn cell(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl RawTable {
    /// Builds a table from string rows, turning empty cells into missing values.
    pub fn from_rows<I>(header: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        Self {
            header,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(cell).collect())
                .collect(),
        }
    }

    /// Reads a comma separated table with a header line.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, EdoError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let header = csv
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record.map_err(csv_error)?;
            rows.push(record.iter().map(|value| cell(value.to_string())).collect());
        }
        Ok(Self { header, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn csv_error(err: csv::Error) -> EdoError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => EdoError::Schema(
            ErrorInfo::new("ragged-row", "row length differs from header length")
                .with_context("line", pos.as_ref().map_or(0, |p| p.line()))
                .with_context("expected", expected_len)
                .with_context("found", len),
        ),
        _ => EdoError::Io(ErrorInfo::new("csv_read", err.to_string())),
    }
}

/// Canonical column naming: trimmed, lowercase, whitespace runs replaced by `_`.
pub fn normalize_column_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
