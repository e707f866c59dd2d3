//! Validation outcomes: failure reports and pass statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{ColumnProfile, ColumnRoles};

use super::checks::CheckContext;
use super::finding::{CheckStage, Finding};

/// Findings from the first failing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Stage that failed.
    pub stage: CheckStage,
    /// Failing rows, in row order (grouped by phone for duplicates).
    pub findings: Vec<Finding>,
    /// Roles the checks ran with.
    pub roles: ColumnRoles,
    /// Rows in the dataset.
    pub row_count: usize,
}

impl ValidationReport {
    pub fn new(
        stage: CheckStage,
        findings: Vec<Finding>,
        roles: ColumnRoles,
        row_count: usize,
    ) -> Self {
        Self {
            stage,
            findings,
            roles,
            row_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings grouped by canonical phone, in order of first appearance.
    pub fn duplicate_groups(&self) -> IndexMap<&str, Vec<&Finding>> {
        let mut groups: IndexMap<&str, Vec<&Finding>> = IndexMap::new();
        for finding in &self.findings {
            if let Some(canonical) = finding.canonical.as_deref() {
                groups.entry(canonical).or_default().push(finding);
            }
        }
        groups
    }

    /// One-line summary of the failure.
    pub fn summary(&self) -> String {
        let n = self.findings.len();
        match self.stage {
            CheckStage::EmptyPhone => format!("Found {} empty phone number(s)", n),
            CheckStage::Letters => format!("Found {} phone number(s) containing letters", n),
            CheckStage::Format => format!("Found {} phone number(s) with an invalid format", n),
            CheckStage::RequiredFields => {
                format!("Found {} row(s) missing required fields", n)
            }
            CheckStage::Duplicates => format!(
                "Found {} duplicated phone number(s) across {} rows",
                self.duplicate_groups().len(),
                n
            ),
        }
    }
}

/// One row of the phone transformation preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonePreview {
    pub row: usize,
    pub raw: String,
    pub canonical: String,
}

impl PhonePreview {
    /// Whether normalization changes the value.
    pub fn changed(&self) -> bool {
        self.raw != self.canonical
    }
}

/// Informational statistics computed for a passing dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub row_count: usize,
    pub column_count: usize,
    /// Profile of every column, in file order.
    pub columns: Vec<ColumnProfile>,
    /// Columns with no values at all.
    pub empty_columns: Vec<String>,
    /// First few phone transformations.
    pub phone_preview: Vec<PhonePreview>,
    /// Distinct non-ASCII characters per column, for columns that have any.
    pub non_ascii: IndexMap<String, Vec<char>>,
}

impl DatasetStatistics {
    /// Every distinct non-ASCII character across all columns, sorted.
    pub fn all_non_ascii(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.non_ascii.values().flatten().copied().collect();
        chars.sort_unstable();
        chars.dedup();
        chars
    }
}

/// A dataset that passed every check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationPass {
    pub roles: ColumnRoles,
    pub statistics: DatasetStatistics,
    /// Rows whose phone normalization changes the raw text.
    pub phones_to_change: usize,
}

impl ValidationPass {
    pub(crate) fn compute(ctx: &CheckContext<'_>, preview_len: usize) -> Self {
        let columns = ColumnProfile::profile_all(ctx.table);
        let empty_columns = columns
            .iter()
            .filter(|c| c.is_empty())
            .map(|c| c.name.clone())
            .collect();
        let non_ascii = columns
            .iter()
            .filter(|c| c.has_non_ascii())
            .map(|c| (c.name.clone(), c.non_ascii.clone()))
            .collect();

        let canonical = ctx.canonical();
        let raw: Vec<String> = ctx.phones().map(|c| c.as_text().into_owned()).collect();
        let phone_preview = raw
            .iter()
            .zip(canonical)
            .take(preview_len)
            .enumerate()
            .map(|(row, (raw, canonical))| PhonePreview {
                row,
                raw: raw.clone(),
                canonical: canonical.clone(),
            })
            .collect();

        let statistics = DatasetStatistics {
            row_count: ctx.table.row_count(),
            column_count: ctx.table.column_count(),
            columns,
            empty_columns,
            phone_preview,
            non_ascii,
        };
        let phones_to_change = canonical.iter().zip(&raw).filter(|(c, r)| c != r).count();

        Self {
            roles: ctx.roles.clone(),
            statistics,
            phones_to_change,
        }
    }
}

/// Result of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Passed(ValidationPass),
    Failed(ValidationReport),
}

impl ValidationOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationOutcome::Passed(_))
    }

    pub fn pass(&self) -> Option<&ValidationPass> {
        match self {
            ValidationOutcome::Passed(pass) => Some(pass),
            ValidationOutcome::Failed(_) => None,
        }
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ValidationOutcome::Failed(report) => Some(report),
            ValidationOutcome::Passed(_) => None,
        }
    }
}
