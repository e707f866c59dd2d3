//! Finding types for failed validation checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::phone::FormatIssue;
use crate::schema::Role;

/// Validation stages, in the order the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStage {
    /// Phone cell is missing or a placeholder.
    EmptyPhone,
    /// Phone cell contains letters.
    Letters,
    /// Canonical phone is not in an accepted regional form.
    Format,
    /// A required name or date is missing on a row with a phone.
    RequiredFields,
    /// Several rows share one canonical phone.
    Duplicates,
}

impl CheckStage {
    /// All stages in run order.
    pub const ALL: [CheckStage; 5] = [
        CheckStage::EmptyPhone,
        CheckStage::Letters,
        CheckStage::Format,
        CheckStage::RequiredFields,
        CheckStage::Duplicates,
    ];

    /// Get a human-readable label for the stage.
    pub fn label(&self) -> &'static str {
        match self {
            CheckStage::EmptyPhone => "Empty Phone",
            CheckStage::Letters => "Letters in Phone",
            CheckStage::Format => "Phone Format",
            CheckStage::RequiredFields => "Required Fields",
            CheckStage::Duplicates => "Duplicate Phone",
        }
    }
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a row failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Reason {
    EmptyPhone,
    ContainsLetters,
    Format { issue: FormatIssue },
    MissingFields { fields: Vec<Role> },
    /// The canonical phone appears `occurrences` times in the dataset.
    Duplicate { occurrences: usize },
}

/// One failing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Zero-based row index.
    pub row: usize,
    /// Row number as shown in a spreadsheet.
    pub display_row: usize,
    /// Offending column(s).
    pub columns: Vec<String>,
    /// Raw phone text.
    pub raw: String,
    /// Canonical phone, for checks that normalize.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Row label (usually the recipient name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub reason: Reason,
}

impl Finding {
    /// Create a finding for a row.
    pub fn new(row: usize, reason: Reason) -> Self {
        Self {
            row,
            display_row: DataTable::display_row(row),
            columns: Vec::new(),
            raw: String::new(),
            canonical: None,
            label: None,
            reason,
        }
    }

    /// Set the offending column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Set the raw phone text.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Set the canonical phone.
    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical = Some(canonical.into());
        self
    }

    /// Set the row label, ignoring blank labels.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label.filter(|l| !l.trim().is_empty());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: ", self.display_row)?;
        match &self.reason {
            Reason::EmptyPhone => write!(f, "empty phone number")?,
            Reason::ContainsLetters => write!(f, "'{}' contains letters", self.raw)?,
            Reason::Format { issue } => write!(
                f,
                "'{}' -> '{}' {}",
                self.raw,
                self.canonical.as_deref().unwrap_or(""),
                issue
            )?,
            Reason::MissingFields { fields } => {
                let names: Vec<&str> = fields.iter().map(|r| r.label()).collect();
                write!(f, "missing {}", names.join(", "))?
            }
            Reason::Duplicate { .. } => write!(f, "'{}'", self.raw)?,
        }
        if let Some(label) = &self.label {
            write!(f, " ({})", label)?;
        }
        Ok(())
    }
}
