//! Core type definitions for column classification.

use serde::{Deserialize, Serialize};

/// Broad content kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// At least the numeric threshold of non-null values parse as numbers.
    Numeric,
    /// Anything else with at least one non-null value.
    Text,
    /// No non-null values at all.
    Empty,
}

impl ColumnKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

impl Default for ColumnKind {
    fn default() -> Self {
        ColumnKind::Empty
    }
}

/// Role a column plays in a contact list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Recipient phone number; always the first column.
    Phone,
    /// Recipient name.
    Name,
    /// A date attached to the recipient (birthday, due date, ...).
    Date,
}

impl Role {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Phone => "Phone",
            Role::Name => "Name",
            Role::Date => "Date",
        }
    }
}
