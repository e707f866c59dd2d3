//! Text normalization for SMS-safe output.

mod charmap;
mod text;

pub use charmap::DEFAULT_CHAR_MAP;
pub use text::{CharTable, CharacterNormalizer, Replacement, ReplacementStats, ReplacementTally};
