//! Data source abstraction and metadata.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Values that stand in for "no data" in contact exports.
///
/// Spreadsheet formulas and database dumps commonly fill unused cells with a
/// zero or a textual null marker rather than leaving them blank.
const EMPTY_LOOKING_TOKENS: &[&str] = &[
    "0", "0.0", "0.00", "nan", "none", "null", "na", "n/a", "nil", "-", ".",
];

static EMPTY_CELL: Cell = Cell::Empty;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Encoding the contents were decoded with.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// A single raw cell value.
///
/// The reader only ever produces [`Cell::Empty`] and [`Cell::Text`]; the
/// numeric variants exist for callers that build tables from typed sources
/// such as spreadsheet exports, where phone numbers may already have been
/// coerced into numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing value.
    Empty,
    /// Raw text as read from the file.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
}

impl Cell {
    /// Build a cell from a raw delimited-text field.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }

    /// True for missing values, including NaN floats.
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// True when the cell is null or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.is_null() || self.as_text().trim().is_empty()
    }

    /// True when the cell carries no meaningful data: null, blank, or one of
    /// the empty-looking placeholder tokens.
    pub fn is_empty_looking(&self) -> bool {
        if self.is_blank() {
            return true;
        }
        let text = self.as_text();
        let trimmed = text.trim();
        EMPTY_LOOKING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
    }

    /// True when the cell is non-null and parses as a number.
    pub fn is_numeric(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Integer(_) => true,
            Cell::Float(f) => !f.is_nan(),
            Cell::Text(s) => s.trim().parse::<f64>().is_ok(),
        }
    }

    /// Text rendering of the cell.
    ///
    /// Whole floats keep a trailing `.0`, matching how spreadsheet exports
    /// print numbers that were coerced from text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Integer(i) => Cow::Owned(i.to_string()),
            Cell::Float(f) if f.is_nan() => Cow::Borrowed(""),
            Cell::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 => {
                Cow::Owned(format!("{:.1}", f))
            }
            Cell::Float(f) => Cow::Owned(f.to_string()),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_field(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// Represents parsed tabular data.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers, unique and in file order.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Cell>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Build a comma-delimited table from string rows.
    ///
    /// Empty strings become [`Cell::Empty`], exactly as the reader does.
    pub fn from_text_rows(headers: &[&str], rows: &[Vec<&str>]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| Cell::from_field(v)).collect())
                .collect(),
            b',',
        )
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&EMPTY_CELL))
    }

    /// Position of a column by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Row number as shown in a spreadsheet: 1-based, after the header row.
    pub fn display_row(index: usize) -> usize {
        index + 2
    }
}
