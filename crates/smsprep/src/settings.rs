//! Persisted export settings.
//!
//! Two values survive between runs: where cleaned files go and what they are
//! called. They live in a small JSON file in the user's home directory.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SmsPrepError};
use crate::transform::DEFAULT_PREFIX;

/// Settings file name, relative to the home directory.
pub const SETTINGS_FILENAME: &str = ".sms_csv_formatter_config.json";

/// Where and under what name cleaned files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Output file name prefix, before sanitizing.
    pub filename_prefix: String,
}

/// On-disk shape; every field is optional so partial files still load.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    output_dir: Option<PathBuf>,
    filename_prefix: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            filename_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn new(output_dir: impl Into<PathBuf>, filename_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            filename_prefix: filename_prefix.into(),
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the file name prefix.
    pub fn with_prefix(mut self, filename_prefix: impl Into<String>) -> Self {
        self.filename_prefix = filename_prefix.into();
        self
    }

    /// The desktop directory, else the home directory, else `.`.
    pub fn default_output_dir() -> PathBuf {
        dirs::desktop_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Location of the settings file in the home directory.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SmsPrepError::Config("home directory not found".to_string()))?;
        Ok(home.join(SETTINGS_FILENAME))
    }

    /// Load settings from the default location.
    ///
    /// Falls back to defaults when there is no home directory or no usable
    /// settings file.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                debug!(error = %e, "using default export settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`.
    ///
    /// A missing or unreadable file yields defaults. A configured directory
    /// that no longer exists is replaced with the default directory.
    pub fn load_from(path: &Path) -> Self {
        let parsed = match read_settings_file(path) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => SettingsFile::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
                SettingsFile::default()
            }
        };

        let output_dir = parsed
            .output_dir
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(Self::default_output_dir);
        let filename_prefix = parsed
            .filename_prefix
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        Self {
            output_dir,
            filename_prefix,
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    /// Save settings to `path` as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| SmsPrepError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(path).map_err(|source| SmsPrepError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut stored = self.clone();
        if stored.filename_prefix.trim().is_empty() {
            stored.filename_prefix = DEFAULT_PREFIX.to_string();
        }
        serde_json::to_writer_pretty(BufWriter::new(file), &stored)?;

        debug!(path = %path.display(), "saved export settings");
        Ok(())
    }
}

fn read_settings_file(path: &Path) -> Result<Option<SettingsFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).map_err(|source| SmsPrepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(serde_json::from_reader(BufReader::new(file))?))
}
