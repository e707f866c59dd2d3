//! Transformation engine that prepares a validated dataset for sending.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{Cell, DataTable};
use crate::normalize::{CharacterNormalizer, ReplacementStats};
use crate::phone::normalize_phone;

/// Summary of one transformation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformResult {
    /// Rows with a non-empty canonical phone.
    pub phones_formatted: usize,
    /// Rows whose phone text changed.
    pub phones_changed: usize,
    /// Characters replaced in text columns.
    pub replacements: ReplacementStats,
}

impl TransformResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Canonicalizes the phone column and transliterates every other column.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    normalizer: CharacterNormalizer,
}

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self {
            normalizer: CharacterNormalizer::new(),
        }
    }

    /// Use a different character normalizer.
    pub fn with_normalizer(normalizer: CharacterNormalizer) -> Self {
        Self { normalizer }
    }

    /// Transform `data` in place.
    pub fn apply(&self, data: &mut DataTable, phone_column: usize) -> TransformResult {
        let mut result = TransformResult::new();

        for row in &mut data.rows {
            for (col, cell) in row.iter_mut().enumerate() {
                if col == phone_column {
                    let canonical = normalize_phone(cell);
                    if !canonical.is_empty() {
                        result.phones_formatted += 1;
                    }
                    if cell.as_text() != canonical {
                        result.phones_changed += 1;
                    }
                    *cell = Cell::from(canonical);
                    continue;
                }

                if let Cell::Text(text) = cell {
                    if text.is_ascii() {
                        continue;
                    }
                    let (out, tally) = self.normalizer.transliterate_tracked(text);
                    if let Some(header) = data.headers.get(col) {
                        result.replacements.record(header, &tally);
                    }
                    *text = out;
                }
            }
        }

        debug!(
            phones = result.phones_formatted,
            phones_changed = result.phones_changed,
            replacements = result.replacements.total_replacements(),
            "transformed dataset"
        );

        result
    }
}
