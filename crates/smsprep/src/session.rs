//! Validate-then-export runs over one source file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SmsPrepError};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::normalize::{CharacterNormalizer, ReplacementStats};
use crate::phone::RegionalFormat;
use crate::schema::{PHONE_COLUMN, RoleDetector, RoleKeywords};
use crate::settings::ExportSettings;
use crate::transform::{TransformEngine, export};
use crate::validation::{CheckStage, DEFAULT_PREVIEW_LEN, ValidationOutcome, ValidationPipeline};

/// Rows shown by [`Session::preview`] when no limit is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Accepted phone number forms.
    pub format: RegionalFormat,
    /// Header keywords for role detection.
    pub keywords: RoleKeywords,
    /// Phone transformations included in pass statistics.
    pub phone_preview_len: usize,
    /// Character substitutions applied to non-phone text on export.
    pub normalizer: CharacterNormalizer,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            format: RegionalFormat::default(),
            keywords: RoleKeywords::default(),
            phone_preview_len: DEFAULT_PREVIEW_LEN,
            normalizer: CharacterNormalizer::new(),
        }
    }
}

/// Where a session is in its validate/export cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RunState {
    /// Nothing validated yet, or the last validation was used up.
    Idle,
    /// Reading the source file.
    Reading,
    /// Running a check stage.
    Checking(CheckStage),
    /// Every check passed; export may proceed.
    Passed,
    /// A check stage produced findings.
    Failed(CheckStage),
    /// The source could not be read.
    Errored(String),
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Reading => write!(f, "reading"),
            RunState::Checking(stage) => write!(f, "checking {}", stage),
            RunState::Passed => write!(f, "passed"),
            RunState::Failed(stage) => write!(f, "failed at {}", stage),
            RunState::Errored(message) => write!(f, "error: {}", message),
        }
    }
}

/// Record count of one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCount {
    pub name: String,
    pub records: usize,
}

/// Result of a successful export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOutput {
    /// Written file.
    pub path: PathBuf,
    /// Rows written.
    pub row_count: usize,
    /// Rows with a non-empty canonical phone.
    pub phones_formatted: usize,
    /// Rows whose phone text changed.
    pub phones_changed: usize,
    /// Characters replaced in text columns.
    pub replacements: ReplacementStats,
    /// Non-empty values per output column, in column order.
    pub columns: Vec<ColumnCount>,
}

/// Before/after rendering of one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRow {
    pub display_row: usize,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Before/after rendering of the first rows of a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<PreviewRow>,
    /// Rows in the whole file.
    pub total_rows: usize,
}

impl Preview {
    /// Rows not shown.
    pub fn remaining(&self) -> usize {
        self.total_rows.saturating_sub(self.rows.len())
    }
}

/// One source file moving through validation and export.
///
/// The file is read fresh for every operation; nothing read during
/// validation is reused by the export.
pub struct Session {
    source: PathBuf,
    state: RunState,
    outcome: Option<ValidationOutcome>,
    validated: Option<SourceMetadata>,
    parser: Parser,
    pipeline: ValidationPipeline,
    engine: TransformEngine,
}

impl Session {
    /// Create a session for `source` with default configuration.
    pub fn new(source: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(source, SessionConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(source: impl Into<PathBuf>, config: SessionConfig) -> Result<Self> {
        let pipeline = ValidationPipeline::new()
            .with_format(config.format)
            .with_detector(RoleDetector::with_keywords(&config.keywords)?)
            .with_preview_len(config.phone_preview_len);

        Ok(Self {
            source: source.into(),
            state: RunState::Idle,
            outcome: None,
            validated: None,
            parser: Parser::with_config(config.parser),
            pipeline,
            engine: TransformEngine::with_normalizer(config.normalizer),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Outcome of the last validation, until it is used up by an export.
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }

    /// Metadata of the read that last passed or failed validation.
    pub fn validated_source(&self) -> Option<&SourceMetadata> {
        self.validated.as_ref()
    }

    /// Forget any validation result.
    pub fn reset(&mut self) {
        self.state = RunState::Idle;
        self.outcome = None;
        self.validated = None;
    }

    /// Read the source and run every check.
    ///
    /// Structural problems with the file are errors; failed checks are
    /// reported in the returned outcome.
    pub fn validate(&mut self) -> Result<&ValidationOutcome> {
        self.reset();
        self.state = RunState::Reading;

        let (table, source) = match self.parser.parse_file(&self.source) {
            Ok(read) => read,
            Err(e) => {
                warn!(file = %self.source.display(), error = %e, "could not read source");
                self.state = RunState::Errored(e.to_string());
                return Err(e);
            }
        };

        let state = &mut self.state;
        let outcome = self.pipeline.run_with(&table, |stage| {
            debug!(stage = stage.label(), "running check");
            *state = RunState::Checking(stage);
        });

        self.state = match &outcome {
            ValidationOutcome::Passed(_) => RunState::Passed,
            ValidationOutcome::Failed(report) => RunState::Failed(report.stage),
        };
        info!(
            file = %source.file,
            rows = source.row_count,
            state = %self.state,
            "validation finished"
        );

        self.validated = Some(source);
        Ok(self.outcome.insert(outcome))
    }

    /// Re-read the source, clean it, and write it out.
    ///
    /// Requires a passing validation. The validation is used up whether or
    /// not the export succeeds.
    pub fn transform(&mut self, settings: &ExportSettings) -> Result<TransformOutput> {
        if self.state != RunState::Passed {
            return Err(SmsPrepError::NotValidated);
        }
        let validated_hash = self.validated.as_ref().map(|s| s.hash.clone());
        self.reset();

        let (mut table, source) = self.parser.parse_file(&self.source)?;
        if validated_hash.as_deref() != Some(source.hash.as_str()) {
            warn!(
                file = %source.file,
                "source changed since validation; exporting current contents"
            );
        }

        let result = self.engine.apply(&mut table, PHONE_COLUMN);
        let path = export(&table, &settings.output_dir, &settings.filename_prefix)?;

        let columns = (0..table.column_count())
            .map(|col| ColumnCount {
                name: table.headers[col].clone(),
                records: table.column_values(col).filter(|c| !c.is_null()).count(),
            })
            .collect();

        info!(
            path = %path.display(),
            phones = result.phones_formatted,
            replacements = result.replacements.total_replacements(),
            "formatting complete"
        );

        Ok(TransformOutput {
            path,
            row_count: table.row_count(),
            phones_formatted: result.phones_formatted,
            phones_changed: result.phones_changed,
            replacements: result.replacements,
            columns,
        })
    }

    /// Before/after rendering of the first `limit` rows.
    ///
    /// Requires a passing validation, which it leaves in place.
    pub fn preview(&self, limit: usize) -> Result<Preview> {
        if self.state != RunState::Passed {
            return Err(SmsPrepError::NotValidated);
        }

        let (table, _) = self.parser.parse_file(&self.source)?;
        let total_rows = table.row_count();
        let mut head = DataTable::new(
            table.headers.clone(),
            table.rows.iter().take(limit).cloned().collect(),
            table.delimiter,
        );
        let before = render_rows(&head);
        self.engine.apply(&mut head, PHONE_COLUMN);
        let after = render_rows(&head);

        let rows = before
            .into_iter()
            .zip(after)
            .enumerate()
            .map(|(index, (before, after))| PreviewRow {
                display_row: DataTable::display_row(index),
                before,
                after,
            })
            .collect();

        Ok(Preview {
            headers: table.headers,
            rows,
            total_rows,
        })
    }
}

fn render_rows(table: &DataTable) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.as_text().into_owned()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("contacts.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_custom_character_map_applies_on_export() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "Phone,Name\n639123456789,Renée Muñoz\n");
        let config = SessionConfig {
            normalizer: CharacterNormalizer::with_table([('é', "e"), ('ñ', "ny")]),
            ..SessionConfig::default()
        };
        let mut session = Session::with_config(&source, config).unwrap();

        assert!(session.validate().unwrap().is_passed());
        let output = session
            .transform(&ExportSettings::new(dir.path().join("out"), "clean"))
            .unwrap();

        assert_eq!(output.replacements.by_char[&'ñ'].replacement, "ny");
        assert_eq!(
            fs::read_to_string(&output.path).unwrap(),
            "Phone,Name\n639123456789,Renee Munyoz\n"
        );
    }

    #[test]
    fn test_validate_passes_and_transform_exports() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "Phone,Name\n+63 912 345 6789,José\n09123456780,Ana\n");
        let mut session = Session::new(&source).unwrap();

        assert!(session.validate().unwrap().is_passed());
        assert_eq!(session.state(), &RunState::Passed);

        let out_dir = dir.path().join("out");
        let output = session
            .transform(&ExportSettings::new(&out_dir, "clean"))
            .unwrap();

        assert_eq!(output.path, out_dir.join("clean.csv"));
        assert_eq!(output.row_count, 2);
        assert_eq!(output.phones_formatted, 2);
        assert_eq!(output.phones_changed, 1);
        assert_eq!(output.replacements.total_replacements(), 1);
        assert_eq!(
            output.columns,
            vec![
                ColumnCount { name: "Phone".into(), records: 2 },
                ColumnCount { name: "Name".into(), records: 2 },
            ]
        );
        assert_eq!(
            fs::read_to_string(&output.path).unwrap(),
            "Phone,Name\n639123456789,Jose\n09123456780,Ana\n"
        );
        assert_eq!(session.state(), &RunState::Idle);
    }

    #[test]
    fn test_transform_requires_passing_validation() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "Phone,Name\n,Ana\n");
        let mut session = Session::new(&source).unwrap();
        let settings = ExportSettings::new(dir.path(), "x");

        assert!(matches!(
            session.transform(&settings),
            Err(SmsPrepError::NotValidated)
        ));

        let outcome = session.validate().unwrap();
        assert!(!outcome.is_passed());
        assert_eq!(session.state(), &RunState::Failed(CheckStage::EmptyPhone));
        assert!(matches!(
            session.transform(&settings),
            Err(SmsPrepError::NotValidated)
        ));
    }

    #[test]
    fn test_unreadable_source_is_errored() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(dir.path().join("missing.csv")).unwrap();

        assert!(matches!(session.validate(), Err(SmsPrepError::Io { .. })));
        assert!(matches!(session.state(), RunState::Errored(_)));
    }

    #[test]
    fn test_export_failure_requires_revalidation() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "Phone\n639123456789\n");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut session = Session::new(&source).unwrap();
        session.validate().unwrap();
        let result = session.transform(&ExportSettings::new(blocker.join("out"), "x"));

        assert!(matches!(result, Err(SmsPrepError::Export { .. })));
        assert_eq!(session.state(), &RunState::Idle);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_preview_shows_before_and_after() {
        let dir = TempDir::new().unwrap();
        let source = write_source(
            &dir,
            "Phone,Name\n639-123-456-789,Zoë\n09123456789,Ana\n639123456780,Ben\n",
        );
        let mut session = Session::new(&source).unwrap();
        assert!(matches!(session.preview(5), Err(SmsPrepError::NotValidated)));

        session.validate().unwrap();
        let preview = session.preview(2).unwrap();

        assert_eq!(preview.headers, vec!["Phone", "Name"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.remaining(), 1);
        assert_eq!(preview.rows[0].display_row, 2);
        assert_eq!(preview.rows[0].before, vec!["639-123-456-789", "Zoë"]);
        assert_eq!(preview.rows[0].after, vec!["639123456789", "Zoe"]);
        assert_eq!(session.state(), &RunState::Passed);
    }
}
