//! Row-level checks and the fail-fast pipeline that runs them.

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::input::{Cell, DataTable};
use crate::phone::{RegionalFormat, normalize_phone};
use crate::schema::{ColumnRoles, RoleDetector};

use super::finding::{CheckStage, Finding, Reason};
use super::report::{ValidationOutcome, ValidationPass, ValidationReport};

/// Number of phone transformations shown in pass statistics.
pub const DEFAULT_PREVIEW_LEN: usize = 5;

/// Everything a check needs to inspect one dataset.
pub struct CheckContext<'a> {
    pub table: &'a DataTable,
    pub roles: &'a ColumnRoles,
    pub format: &'a RegionalFormat,
    canonical: OnceCell<Vec<String>>,
}

impl<'a> CheckContext<'a> {
    pub fn new(table: &'a DataTable, roles: &'a ColumnRoles, format: &'a RegionalFormat) -> Self {
        Self {
            table,
            roles,
            format,
            canonical: OnceCell::new(),
        }
    }

    /// Phone cells in row order.
    pub fn phones(&self) -> impl Iterator<Item = &'a Cell> {
        self.table.column_values(self.roles.phone)
    }

    /// Header of the phone column.
    pub fn phone_header(&self) -> &'a str {
        self.table
            .headers
            .get(self.roles.phone)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Canonical phone for every row, computed once.
    pub fn canonical(&self) -> &[String] {
        self.canonical
            .get_or_init(|| self.phones().map(normalize_phone).collect())
    }

    /// Start a finding for a row, filled with the phone column, raw value
    /// and row label.
    fn finding(&self, row: usize, cell: &Cell, reason: Reason) -> Finding {
        Finding::new(row, reason)
            .with_column(self.phone_header())
            .with_raw(cell.as_text())
            .with_label(self.roles.row_label(self.table, row))
    }
}

/// A single validation check.
pub trait Check {
    /// Stage this check reports under.
    fn stage(&self) -> CheckStage;

    /// Run the check and return one finding per failing row.
    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding>;
}

/// Whether a phone cell counts as missing.
///
/// Null, blank and placeholder cells are empty, except that a decimal string
/// holding a non-zero whole number (`"639123456789.0"`) is left to the
/// normalizer.
pub fn is_empty_phone(cell: &Cell) -> bool {
    if cell.is_null() {
        return true;
    }
    if is_whole_decimal(&cell.as_text()) {
        return false;
    }
    cell.is_empty_looking()
}

fn is_whole_decimal(text: &str) -> bool {
    if !text.contains('.') {
        return false;
    }
    match text.trim().parse::<f64>() {
        Ok(v) => v.is_finite() && v.fract() == 0.0 && v != 0.0,
        Err(_) => false,
    }
}

/// Whether raw phone text contains letters.
///
/// Scientific notation (`6.39123456789E+11`) is a number a spreadsheet
/// produced, not contamination, and is left to the normalizer.
pub fn contains_letters(text: &str) -> bool {
    if !text.chars().any(char::is_alphabetic) {
        return false;
    }
    !is_scientific_number(text)
}

fn is_scientific_number(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.contains(['e', 'E'])
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Flags rows whose phone is missing.
pub struct EmptyPhoneCheck;

impl Check for EmptyPhoneCheck {
    fn stage(&self) -> CheckStage {
        CheckStage::EmptyPhone
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        ctx.phones()
            .enumerate()
            .filter(|(_, cell)| is_empty_phone(cell))
            .map(|(row, cell)| ctx.finding(row, cell, Reason::EmptyPhone))
            .collect()
    }
}

/// Flags phones containing alphabetic characters.
pub struct LetterCheck;

impl Check for LetterCheck {
    fn stage(&self) -> CheckStage {
        CheckStage::Letters
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        ctx.phones()
            .enumerate()
            .filter(|(_, cell)| matches!(cell, Cell::Text(text) if contains_letters(text)))
            .map(|(row, cell)| ctx.finding(row, cell, Reason::ContainsLetters))
            .collect()
    }
}

/// Flags phones whose canonical form is not an accepted regional form.
pub struct FormatCheck;

impl Check for FormatCheck {
    fn stage(&self) -> CheckStage {
        CheckStage::Format
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let canonical = ctx.canonical();
        ctx.phones()
            .enumerate()
            .filter_map(|(row, cell)| {
                let digits = &canonical[row];
                ctx.format.check(digits).err().map(|issue| {
                    ctx.finding(row, cell, Reason::Format { issue })
                        .with_canonical(digits.as_str())
                })
            })
            .collect()
    }
}

/// Flags rows with a phone but without a required name or date.
pub struct RequiredFieldCheck;

impl Check for RequiredFieldCheck {
    fn stage(&self) -> CheckStage {
        CheckStage::RequiredFields
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let required: Vec<_> = ctx.roles.required().collect();
        if required.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        for (row, cell) in ctx.phones().enumerate() {
            if is_empty_phone(cell) {
                continue;
            }
            let missing: Vec<_> = required
                .iter()
                .filter(|(_, col)| {
                    ctx.table
                        .get(row, col.index)
                        .is_none_or(Cell::is_blank)
                })
                .collect();
            if missing.is_empty() {
                continue;
            }

            let mut finding = ctx.finding(
                row,
                cell,
                Reason::MissingFields {
                    fields: missing.iter().map(|(role, _)| *role).collect(),
                },
            );
            finding.columns = missing.iter().map(|(_, col)| col.header.clone()).collect();
            findings.push(finding);
        }
        findings
    }
}

/// Flags every row whose canonical phone appears more than once.
///
/// Findings are grouped by phone, groups in order of first appearance.
pub struct DuplicateCheck;

impl Check for DuplicateCheck {
    fn stage(&self) -> CheckStage {
        CheckStage::Duplicates
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let canonical = ctx.canonical();
        let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (row, digits) in canonical.iter().enumerate() {
            if digits.is_empty() {
                continue;
            }
            groups.entry(digits.as_str()).or_default().push(row);
        }
        groups.retain(|_, rows| rows.len() > 1);

        let cells: Vec<&Cell> = ctx.phones().collect();
        groups
            .into_iter()
            .flat_map(|(digits, rows)| {
                let occurrences = rows.len();
                rows.into_iter().map(move |row| (digits, occurrences, row))
            })
            .map(|(digits, occurrences, row)| {
                ctx.finding(row, cells[row], Reason::Duplicate { occurrences })
                    .with_canonical(digits)
            })
            .collect()
    }
}

/// Runs checks in order and stops at the first stage with findings.
pub struct ValidationPipeline {
    checks: Vec<Box<dyn Check>>,
    format: RegionalFormat,
    detector: RoleDetector,
    preview_len: usize,
}

impl ValidationPipeline {
    /// Create a pipeline with all checks in their fixed order.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(EmptyPhoneCheck),
                Box::new(LetterCheck),
                Box::new(FormatCheck),
                Box::new(RequiredFieldCheck),
                Box::new(DuplicateCheck),
            ],
            format: RegionalFormat::default(),
            detector: RoleDetector::new(),
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }

    /// Use a different regional format.
    pub fn with_format(mut self, format: RegionalFormat) -> Self {
        self.format = format;
        self
    }

    /// Use a different role detector.
    pub fn with_detector(mut self, detector: RoleDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Number of phone transformations to include in pass statistics.
    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }

    pub fn format(&self) -> &RegionalFormat {
        &self.format
    }

    /// Validate a dataset.
    pub fn run(&self, table: &DataTable) -> ValidationOutcome {
        self.run_with(table, |_| {})
    }

    /// Validate a dataset, calling `on_stage` as each stage starts.
    pub fn run_with(
        &self,
        table: &DataTable,
        mut on_stage: impl FnMut(CheckStage),
    ) -> ValidationOutcome {
        let roles = self.detector.detect(table);
        let ctx = CheckContext::new(table, &roles, &self.format);

        for check in &self.checks {
            let stage = check.stage();
            on_stage(stage);
            let findings = check.run(&ctx);
            debug!(stage = stage.label(), findings = findings.len(), "check finished");

            if !findings.is_empty() {
                return ValidationOutcome::Failed(ValidationReport::new(
                    stage,
                    findings,
                    roles.clone(),
                    table.row_count(),
                ));
            }
        }

        ValidationOutcome::Passed(ValidationPass::compute(&ctx, self.preview_len))
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phone::FormatIssue;
    use crate::schema::Role;

    fn run(headers: &[&str], rows: &[Vec<&str>]) -> ValidationOutcome {
        ValidationPipeline::new().run(&DataTable::from_text_rows(headers, rows))
    }

    fn failed(outcome: ValidationOutcome) -> ValidationReport {
        match outcome {
            ValidationOutcome::Failed(report) => report,
            ValidationOutcome::Passed(_) => panic!("expected validation to fail"),
        }
    }

    #[test]
    fn test_empty_phone_detection() {
        assert!(is_empty_phone(&Cell::Empty));
        assert!(is_empty_phone(&Cell::from("  ")));
        assert!(is_empty_phone(&Cell::from("0")));
        assert!(is_empty_phone(&Cell::from("0.0")));
        assert!(is_empty_phone(&Cell::from("null")));
        assert!(is_empty_phone(&Cell::Float(0.0)));
        assert!(!is_empty_phone(&Cell::from("639123456789.0")));
        assert!(!is_empty_phone(&Cell::Float(639123456789.0)));
        assert!(!is_empty_phone(&Cell::from("09123456789")));
    }

    #[test]
    fn test_letter_detection() {
        assert!(contains_letters("09CALLME12"));
        assert!(contains_letters("0917abc4567"));
        assert!(contains_letters("ext. 12"));
        assert!(!contains_letters("+63 (917) 123-4567"));
        assert!(!contains_letters("6.39123456789E+11"));
        assert!(contains_letters("6.39E+11 mobile"));
    }

    #[test]
    fn test_clean_row_passes() {
        let outcome = run(
            &["Phone", "Name", "Date"],
            &[vec!["639123456789", "Jane Doe", "2024-01-01"]],
        );
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_empty_phone_fails_first() {
        let report = failed(run(
            &["Phone", "Name"],
            &[
                vec!["639123456789", "Ana"],
                vec!["", "Ben"],
                vec!["09CALLME12", "Cy"],
            ],
        ));
        assert_eq!(report.stage, CheckStage::EmptyPhone);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].display_row, 3);
        assert_eq!(report.findings[0].label.as_deref(), Some("Ben"));
    }

    #[test]
    fn test_letters_reported_before_format() {
        let report = failed(run(
            &["Phone", "Name"],
            &[vec!["09CALLME12", "Ana"], vec!["123", "Ben"]],
        ));
        assert_eq!(report.stage, CheckStage::Letters);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].raw, "09CALLME12");
        assert_eq!(report.findings[0].reason, Reason::ContainsLetters);
    }

    #[test]
    fn test_format_failure_carries_canonical_and_reason() {
        let report = failed(run(
            &["Phone", "Name"],
            &[vec!["639123456789", "Ana"], vec!["0812-345-6789", "Ben"]],
        ));
        assert_eq!(report.stage, CheckStage::Format);
        let finding = &report.findings[0];
        assert_eq!(finding.row, 1);
        assert_eq!(finding.canonical.as_deref(), Some("08123456789"));
        assert_eq!(
            finding.reason,
            Reason::Format {
                issue: FormatIssue::WrongPrefix { digits: 11 }
            }
        );
    }

    #[test]
    fn test_required_fields() {
        let report = failed(run(
            &["Phone", "Name", "Birth Date"],
            &[
                vec!["639123456789", "Ana", "2024-01-01"],
                vec!["639123456780", "", "  "],
                vec!["639123456781", "Cy", ""],
            ],
        ));
        assert_eq!(report.stage, CheckStage::RequiredFields);
        assert_eq!(report.findings.len(), 2);
        assert_eq!(
            report.findings[0].reason,
            Reason::MissingFields {
                fields: vec![Role::Name, Role::Date]
            }
        );
        assert_eq!(report.findings[0].columns, vec!["Name", "Birth Date"]);
        assert_eq!(
            report.findings[1].reason,
            Reason::MissingFields {
                fields: vec![Role::Date]
            }
        );
    }

    #[test]
    fn test_placeholder_like_names_are_values() {
        let outcome = run(
            &["Phone", "Name"],
            &[
                vec!["639123456789", "Na"],
                vec!["639123456780", "Nil"],
                vec!["639123456781", "Ana"],
            ],
        );
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_scientific_phone_passes() {
        let outcome = run(&["Phone", "Name"], &[vec!["6.39123456789E+11", "Ana"]]);
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_unused_date_column_is_not_enforced() {
        let outcome = run(
            &["Phone", "Name", "Date"],
            &[
                vec!["639123456789", "Ana", ""],
                vec!["639123456780", "Ben", "0.00"],
            ],
        );
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_duplicates_grouped() {
        let report = failed(run(
            &["Phone", "Name"],
            &[
                vec!["09123456789", "Ana"],
                vec!["639123456789", "Ben"],
                vec!["0912-345-6789", "Cy"],
                vec!["639123456780", "Di"],
            ],
        ));
        assert_eq!(report.stage, CheckStage::Duplicates);
        let rows: Vec<usize> = report.findings.iter().map(|f| f.display_row).collect();
        assert_eq!(rows, vec![2, 4]);
        assert!(
            report
                .findings
                .iter()
                .all(|f| f.canonical.as_deref() == Some("09123456789"))
        );
        assert_eq!(report.findings[0].reason, Reason::Duplicate { occurrences: 2 });
    }

    #[test]
    fn test_cross_format_numbers_are_not_duplicates() {
        let outcome = run(
            &["Phone", "Name"],
            &[vec!["09123456789", "Ana"], vec!["639123456789", "Ana"]],
        );
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_stage_callback_sees_stages_in_order() {
        let table = DataTable::from_text_rows(&["Phone"], &[vec!["639123456789"]]);
        let mut seen = Vec::new();
        let outcome = ValidationPipeline::new().run_with(&table, |stage| seen.push(stage));
        assert!(outcome.is_passed());
        assert_eq!(seen, CheckStage::ALL.to_vec());
    }
}
