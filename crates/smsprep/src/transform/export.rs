//! Output naming and CSV export.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::error::{Result, SmsPrepError};
use crate::input::DataTable;

/// Output file name used when no prefix is configured.
pub const DEFAULT_PREFIX: &str = "sms_contacts";

static INVALID_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// Turn a user-supplied prefix into a safe file stem.
///
/// Any extension is dropped and characters that are invalid in file names
/// are replaced with `_`.
///
/// ```
/// use smsprep::transform::sanitize_prefix;
///
/// assert_eq!(sanitize_prefix("march blast.csv"), "march blast");
/// assert_eq!(sanitize_prefix("a:b?c"), "a_b_c");
/// assert_eq!(sanitize_prefix("  "), "sms_contacts");
/// ```
pub fn sanitize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim();
    if trimmed.is_empty() {
        return DEFAULT_PREFIX.to_string();
    }
    INVALID_FILENAME_CHARS
        .replace_all(strip_extension(trimmed), "_")
        .into_owned()
}

/// Drop the final extension of the last path component, keeping leading
/// dots of hidden-file style names.
fn strip_extension(name: &str) -> &str {
    let base_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let base = &name[base_start..];
    let leading_dots = base.len() - base.trim_start_matches('.').len();
    match base[leading_dots..].rfind('.') {
        Some(i) => &name[..base_start + leading_dots + i],
        None => name,
    }
}

/// First free `<stem>.csv`, `<stem>_1.csv`, `<stem>_2.csv`, ... in `dir`.
pub fn unique_output_path(dir: &Path, stem: &str) -> PathBuf {
    let mut path = dir.join(format!("{}.csv", stem));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(format!("{}_{}.csv", stem, counter));
        counter += 1;
    }
    path
}

/// Write a table as comma-delimited UTF-8 to a new file at `path`.
///
/// Never overwrites: an existing file at `path` is an error.
pub fn write_csv(table: &DataTable, path: &Path) -> Result<()> {
    let export_err = |source: io::Error| SmsPrepError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(export_err)?;

    let mut writer = csv::WriterBuilder::new().from_writer(BufWriter::new(file));
    writer
        .write_record(&table.headers)
        .map_err(|e| export_err(e.into()))?;

    let mut record: Vec<String> = Vec::with_capacity(table.column_count());
    for row in 0..table.row_count() {
        record.clear();
        record.extend((0..table.column_count()).map(|col| {
            table
                .get(row, col)
                .map(|cell| cell.as_text().into_owned())
                .unwrap_or_default()
        }));
        writer
            .write_record(&record)
            .map_err(|e| export_err(e.into()))?;
    }
    writer.flush().map_err(export_err)?;
    Ok(())
}

/// Export a table into `dir` under a unique name derived from `prefix`.
///
/// The directory is created if needed. Returns the written path.
pub fn export(table: &DataTable, dir: &Path, prefix: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| SmsPrepError::Export {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = unique_output_path(dir, &sanitize_prefix(prefix));
    write_csv(table, &path)?;

    info!(path = %path.display(), rows = table.row_count(), "exported file");
    Ok(path)
}
