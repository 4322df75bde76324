//! Store configuration.
//!
//! # Responsibility
//! - Load the process-wide category list and bootstrap options from JSON.
//! - Normalize and validate configuration before a store is built.
//!
//! # Invariants
//! - A validated config has at least one category.
//! - Categories are trimmed, non-blank and unique (first occurrence wins).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Categories available when no configuration is supplied.
pub const DEFAULT_CATEGORIES: &[&str] = &["Work", "Personal", "Health", "Education", "Entertainment"];

/// Categories referenced by the built-in sample tasks.
pub(crate) const SAMPLE_TASK_CATEGORIES: &[&str] = &["Work", "Health", "Personal"];

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Bootstrap options for [`crate::TaskStore`] and its host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub categories: Vec<String>,
    /// Seeds the three demo tasks on startup.
    pub seed_sample_tasks: bool,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            seed_sample_tasks: false,
            log_level: None,
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON document. Missing keys take defaults.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.normalized()
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Returns a copy with a trimmed, de-duplicated category list.
    ///
    /// # Errors
    /// - No non-blank category remains.
    /// - Sample seeding is requested but a sample category is missing.
    pub fn normalized(&self) -> ConfigResult<Self> {
        let mut categories: Vec<String> = Vec::with_capacity(self.categories.len());
        for raw in &self.categories {
            let category = raw.trim();
            if category.is_empty() || categories.iter().any(|known| known == category) {
                continue;
            }
            categories.push(category.to_string());
        }

        if categories.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one category is required".to_string(),
            ));
        }

        if self.seed_sample_tasks {
            if let Some(missing) = SAMPLE_TASK_CATEGORIES
                .iter()
                .copied()
                .find(|sample| !categories.iter().any(|known| known.as_str() == *sample))
            {
                return Err(ConfigError::Invalid(format!(
                    "seed_sample_tasks requires category `{missing}`"
                )));
            }
        }

        Ok(Self {
            categories,
            ..self.clone()
        })
    }
}
