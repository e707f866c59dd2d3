//! Per-column profiles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::ColumnKind;
use crate::input::DataTable;

/// Share of non-null values that must parse as numbers for a column to be
/// considered numeric.
pub const NUMERIC_THRESHOLD: f64 = 0.8;

/// Summary of one column's contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred content kind.
    pub kind: ColumnKind,
    /// Total number of values (including nulls).
    pub count: usize,
    /// Number of non-null values.
    pub non_empty_count: usize,
    /// Number of non-null values that parse as numbers.
    pub numeric_count: usize,
    /// Distinct non-ASCII characters present, sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_ascii: Vec<char>,
}

impl ColumnProfile {
    /// Profile the column at `position`.
    pub fn from_column(table: &DataTable, position: usize) -> Self {
        let mut count = 0;
        let mut non_empty_count = 0;
        let mut numeric_count = 0;
        let mut non_ascii = BTreeSet::new();

        for cell in table.column_values(position) {
            count += 1;
            if cell.is_null() {
                continue;
            }
            non_empty_count += 1;
            if cell.is_numeric() {
                numeric_count += 1;
            }
            let text = cell.as_text();
            if !text.is_ascii() {
                non_ascii.extend(text.chars().filter(|c| !c.is_ascii()));
            }
        }

        let kind = if non_empty_count == 0 {
            ColumnKind::Empty
        } else if numeric_count as f64 / non_empty_count as f64 >= NUMERIC_THRESHOLD {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        };

        Self {
            name: table.headers.get(position).cloned().unwrap_or_default(),
            position,
            kind,
            count,
            non_empty_count,
            numeric_count,
            non_ascii: non_ascii.into_iter().collect(),
        }
    }

    /// Profile every column in file order.
    pub fn profile_all(table: &DataTable) -> Vec<Self> {
        (0..table.column_count())
            .map(|position| Self::from_column(table, position))
            .collect()
    }

    /// True when the column has no values at all.
    pub fn is_empty(&self) -> bool {
        self.non_empty_count == 0
    }

    pub fn has_non_ascii(&self) -> bool {
        !self.non_ascii.is_empty()
    }

    /// Get the null percentage.
    pub fn null_percentage(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            ((self.count - self.non_empty_count) as f64 / self.count as f64) * 100.0
        }
    }
}
