//! Transliteration of free text to ASCII.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::charmap::DEFAULT_CHAR_MAP;
use crate::input::Cell;

/// What a source character was rewritten to, and how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub replacement: String,
    pub count: usize,
}

/// Per-value replacement tally, keyed by source character in table order.
pub type ReplacementTally = IndexMap<char, Replacement>;

/// Substitution table entries: source character and its replacement.
pub type CharTable = Arc<[(char, String)]>;

static DEFAULT_TABLE: Lazy<CharTable> = Lazy::new(|| {
    DEFAULT_CHAR_MAP
        .iter()
        .map(|(c, r)| (*c, r.to_string()))
        .collect()
});

/// Rewrites mapped non-ASCII characters using an ordered substitution table.
///
/// Characters missing from the table are left as they are.
#[derive(Debug, Clone)]
pub struct CharacterNormalizer {
    table: CharTable,
}

impl CharacterNormalizer {
    /// Normalizer using the built-in table.
    pub fn new() -> Self {
        Self {
            table: Arc::clone(&*DEFAULT_TABLE),
        }
    }

    /// Normalizer using a caller-supplied table, applied in the given order.
    ///
    /// Only the first entry for a repeated source character is kept.
    pub fn with_table<I, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut entries: Vec<(char, String)> = Vec::new();
        for (source, replacement) in table {
            if !entries.iter().any(|(c, _)| *c == source) {
                entries.push((source, replacement.into()));
            }
        }
        Self {
            table: entries.into(),
        }
    }

    /// The substitution table in application order.
    pub fn table(&self) -> &[(char, String)] {
        &self.table
    }

    /// Whether the table has an entry for `c`.
    pub fn is_mapped(&self, c: char) -> bool {
        self.table.iter().any(|(source, _)| *source == c)
    }

    /// Replace every mapped character in `text`.
    pub fn transliterate(&self, text: &str) -> String {
        if text.is_ascii() {
            return text.to_string();
        }
        let mut out = text.to_string();
        for (source, replacement) in self.table.iter() {
            if out.contains(*source) {
                out = out.replace(*source, replacement);
            }
        }
        out
    }

    /// Replace every mapped character and report what was replaced.
    pub fn transliterate_tracked(&self, text: &str) -> (String, ReplacementTally) {
        let mut tally = ReplacementTally::new();
        if text.is_ascii() {
            return (text.to_string(), tally);
        }
        let mut out = text.to_string();
        for (source, replacement) in self.table.iter() {
            let count = out.matches(*source).count();
            if count > 0 {
                tally.insert(
                    *source,
                    Replacement {
                        replacement: replacement.clone(),
                        count,
                    },
                );
                out = out.replace(*source, replacement);
            }
        }
        (out, tally)
    }

    /// Transliterate a cell; only text cells can change.
    pub fn transliterate_cell(&self, cell: &Cell) -> (Cell, ReplacementTally) {
        match cell {
            Cell::Text(text) => {
                let (out, tally) = self.transliterate_tracked(text);
                (Cell::Text(out), tally)
            }
            other => (other.clone(), ReplacementTally::new()),
        }
    }
}

impl Default for CharacterNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Dataset-wide replacement histogram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplacementStats {
    /// Totals per source character, in first-seen order.
    pub by_char: IndexMap<char, Replacement>,
    /// Total replacements per column, only for columns with at least one.
    pub by_column: IndexMap<String, usize>,
}

impl ReplacementStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one value's tally into the histogram.
    pub fn record(&mut self, column: &str, tally: &ReplacementTally) {
        if tally.is_empty() {
            return;
        }
        let mut in_value = 0;
        for (source, rep) in tally {
            in_value += rep.count;
            self.by_char
                .entry(*source)
                .or_insert_with(|| Replacement {
                    replacement: rep.replacement.clone(),
                    count: 0,
                })
                .count += rep.count;
        }
        *self.by_column.entry(column.to_string()).or_insert(0) += in_value;
    }

    /// Total number of characters replaced.
    pub fn total_replacements(&self) -> usize {
        self.by_column.values().sum()
    }

    /// Number of columns with at least one replacement.
    pub fn affected_columns(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }

    /// Character breakdown, most frequent first.
    pub fn sorted_by_count(&self) -> Vec<(char, &Replacement)> {
        let mut entries: Vec<_> = self.by_char.iter().map(|(c, r)| (*c, r)).collect();
        entries.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        entries
    }
}
