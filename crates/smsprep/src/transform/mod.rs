//! Dataset transformation and export.

mod engine;
mod export;

pub use engine::{TransformEngine, TransformResult};
pub use export::{DEFAULT_PREFIX, export, sanitize_prefix, unique_output_path, write_csv};
