//! Column role detection from header text and content.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::Role;
use crate::error::{Result, SmsPrepError};
use crate::input::DataTable;

/// Header keywords that mark a name column.
const NAME_KEYWORDS: &[&str] = &["name", "contact", "recipient", "customer", "client", "person"];

/// Header keywords that mark a date column.
const DATE_KEYWORDS: &[&str] = &["date", "dob", "birth", "birthday", "anniversary"];

/// Index of the phone column.
pub const PHONE_COLUMN: usize = 0;

static DEFAULT_DETECTOR: Lazy<RoleDetector> = Lazy::new(|| {
    RoleDetector::with_keywords(&RoleKeywords::default())
        .expect("built-in role keywords are valid patterns")
});

/// Keyword tables used to match headers to roles.
///
/// Matching is a case-insensitive substring test against the header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleKeywords {
    pub name: Vec<String>,
    pub date: Vec<String>,
}

impl Default for RoleKeywords {
    fn default() -> Self {
        Self {
            name: NAME_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            date: DATE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// A column assigned to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleColumn {
    /// Zero-based position in the table.
    pub index: usize,
    /// Header text.
    pub header: String,
    /// Whether every row with a phone must fill this column.
    ///
    /// Only set when the column holds at least one meaningful value, so a
    /// column the source file leaves blank throughout is never enforced.
    pub required: bool,
}

/// Roles assigned to the columns of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    /// Phone column index.
    pub phone: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<RoleColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<RoleColumn>,
    /// Column used to label rows in diagnostics: the name column, else the
    /// second column when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<usize>,
}

impl ColumnRoles {
    /// Column assigned to `role`, if any.
    pub fn column(&self, role: Role) -> Option<usize> {
        match role {
            Role::Phone => Some(self.phone),
            Role::Name => self.name.as_ref().map(|c| c.index),
            Role::Date => self.date.as_ref().map(|c| c.index),
        }
    }

    /// Roles that must be filled on every row with a phone.
    pub fn required(&self) -> impl Iterator<Item = (Role, &RoleColumn)> {
        [(Role::Name, &self.name), (Role::Date, &self.date)]
            .into_iter()
            .filter_map(|(role, col)| col.as_ref().filter(|c| c.required).map(|c| (role, c)))
    }

    /// Text labelling a row in diagnostics.
    pub fn row_label(&self, table: &DataTable, row: usize) -> Option<String> {
        let col = self.label?;
        table.get(row, col).map(|cell| cell.as_text().into_owned())
    }
}

/// Assigns name and date roles to columns.
#[derive(Debug, Clone)]
pub struct RoleDetector {
    name_pattern: Option<Regex>,
    date_pattern: Option<Regex>,
}

impl RoleDetector {
    /// Detector using the built-in keyword tables.
    pub fn new() -> Self {
        DEFAULT_DETECTOR.clone()
    }

    /// Detector using custom keyword tables.
    pub fn with_keywords(keywords: &RoleKeywords) -> Result<Self> {
        Ok(Self {
            name_pattern: keyword_pattern(&keywords.name)?,
            date_pattern: keyword_pattern(&keywords.date)?,
        })
    }

    /// Whether a header names a column for `role`.
    pub fn matches(&self, role: Role, header: &str) -> bool {
        let pattern = match role {
            Role::Phone => return false,
            Role::Name => &self.name_pattern,
            Role::Date => &self.date_pattern,
        };
        pattern.as_ref().is_some_and(|p| p.is_match(header))
    }

    /// First non-phone column whose header matches `role`.
    pub fn find_header(&self, role: Role, headers: &[String]) -> Option<usize> {
        self.find_header_where(role, headers, |_, _| false)
    }

    /// First non-phone column matching `role` that `skip` lets through.
    fn find_header_where(
        &self,
        role: Role,
        headers: &[String],
        skip: impl Fn(usize, &str) -> bool,
    ) -> Option<usize> {
        headers
            .iter()
            .enumerate()
            .skip(PHONE_COLUMN + 1)
            .find(|(index, header)| {
                self.matches(role, header) && !skip(*index, header.as_str())
            })
            .map(|(index, _)| index)
    }

    /// Pick distinct name and date columns.
    ///
    /// Headers matching only one role are taken first. A header matching
    /// both (`Contact Date`) then fills whichever role is still open, date
    /// before name.
    fn assign_columns(&self, headers: &[String]) -> (Option<usize>, Option<usize>) {
        let mut name = self.find_header_where(Role::Name, headers, |_, h| {
            self.matches(Role::Date, h)
        });
        let mut date = self.find_header_where(Role::Date, headers, |_, h| {
            self.matches(Role::Name, h)
        });

        if date.is_none() {
            date = self.find_header_where(Role::Date, headers, |i, _| Some(i) == name);
        }
        if name.is_none() {
            name = self.find_header_where(Role::Name, headers, |i, _| Some(i) == date);
        }
        (name, date)
    }

    /// Assign roles for a dataset.
    ///
    /// A column holds at most one role.
    pub fn detect(&self, table: &DataTable) -> ColumnRoles {
        let (name_index, date_index) = self.assign_columns(&table.headers);
        let assign = |index: Option<usize>| {
            index.map(|index| RoleColumn {
                index,
                header: table.headers[index].clone(),
                required: has_meaningful_value(table, index),
            })
        };

        let name = assign(name_index);
        let date = assign(date_index);
        let label = name
            .as_ref()
            .map(|c| c.index)
            .or_else(|| (table.column_count() > 1).then_some(1));

        debug!(
            name = ?name.as_ref().map(|c| (&c.header, c.required)),
            date = ?date.as_ref().map(|c| (&c.header, c.required)),
            "detected column roles"
        );

        ColumnRoles {
            phone: PHONE_COLUMN,
            name,
            date,
            label,
        }
    }
}

impl Default for RoleDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn keyword_pattern(keywords: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))
        .map(Some)
        .map_err(|e| SmsPrepError::Config(format!("invalid role keyword pattern: {}", e)))
}

fn has_meaningful_value(table: &DataTable, index: usize) -> bool {
    table.column_values(index).any(|cell| !cell.is_empty_looking())
}
