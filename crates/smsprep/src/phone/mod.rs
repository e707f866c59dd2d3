//! Phone number canonicalization and regional validation.

mod format;
mod normalizer;

pub use format::{FormatIssue, PhoneKind, RegionalFormat};
pub use normalizer::{normalize_phone, normalize_phone_str};
