//! smsprep: contact list validation and cleanup for bulk SMS.
//!
//! smsprep takes a delimited contact list whose first column holds phone
//! numbers, checks it row by row, and writes a cleaned copy ready for a bulk
//! messaging gateway.
//!
//! # Core Principles
//!
//! - **Fail fast**: checks run in a fixed order and stop at the first stage
//!   with problems, so the user fixes one kind of defect at a time
//! - **Non-destructive**: the source file is never modified; the export is a
//!   new file that never overwrites an existing one
//! - **Leading zeros survive**: phone numbers are handled as text from the
//!   moment they are read
//!
//! # Example
//!
//! ```no_run
//! use smsprep::{ExportSettings, Session, ValidationOutcome};
//!
//! let mut session = Session::new("contacts.csv").unwrap();
//! match session.validate().unwrap() {
//!     ValidationOutcome::Passed(pass) => {
//!         println!("{} rows ok", pass.statistics.row_count);
//!     }
//!     ValidationOutcome::Failed(report) => {
//!         println!("{}", report.summary());
//!         return;
//!     }
//! }
//!
//! let output = session.transform(&ExportSettings::load()).unwrap();
//! println!("Saved to {}", output.path.display());
//! ```

pub mod error;
pub mod input;
pub mod normalize;
pub mod phone;
pub mod schema;
pub mod settings;
pub mod transform;
pub mod validation;

mod session;

use std::path::Path;

pub use crate::session::{
    ColumnCount, DEFAULT_PREVIEW_ROWS, Preview, PreviewRow, RunState, Session, SessionConfig,
    TransformOutput,
};
pub use error::{Result, SmsPrepError};
pub use input::{Cell, DataTable, SourceMetadata};
pub use normalize::{CharacterNormalizer, ReplacementStats};
pub use phone::{RegionalFormat, normalize_phone, normalize_phone_str};
pub use schema::{ColumnRoles, Role};
pub use settings::ExportSettings;
pub use validation::{CheckStage, Finding, ValidationOutcome, ValidationPass, ValidationReport};

/// Validate a file with default configuration.
pub fn validate(path: impl AsRef<Path>) -> Result<ValidationOutcome> {
    let mut session = Session::new(path.as_ref())?;
    Ok(session.validate()?.clone())
}

/// Validate a file and, if it passes, export the cleaned copy.
///
/// Returns [`SmsPrepError::NotValidated`] when any check fails; use
/// [`validate`] or a [`Session`] to see why.
pub fn transform(path: impl AsRef<Path>, settings: &ExportSettings) -> Result<TransformOutput> {
    transform_with(path, CharacterNormalizer::new(), settings)
}

/// Like [`transform`], rewriting text with a caller-supplied character map.
pub fn transform_with(
    path: impl AsRef<Path>,
    normalizer: CharacterNormalizer,
    settings: &ExportSettings,
) -> Result<TransformOutput> {
    let config = SessionConfig {
        normalizer,
        ..SessionConfig::default()
    };
    let mut session = Session::with_config(path.as_ref(), config)?;
    if !session.validate()?.is_passed() {
        return Err(SmsPrepError::NotValidated);
    }
    session.transform(settings)
}
