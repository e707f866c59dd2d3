//! Fail-fast validation of contact rows.

mod checks;
mod finding;
mod report;

pub use checks::{
    Check, CheckContext, DEFAULT_PREVIEW_LEN, DuplicateCheck, EmptyPhoneCheck, FormatCheck,
    LetterCheck, RequiredFieldCheck, ValidationPipeline, contains_letters, is_empty_phone,
};
pub use finding::{CheckStage, Finding, Reason};
pub use report::{
    DatasetStatistics, PhonePreview, ValidationOutcome, ValidationPass, ValidationReport,
};
