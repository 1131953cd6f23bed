use crate::config::schema::{EditPlan, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Json { path: None, source } => ConfigError::Json {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read edit plan from {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse edit plan TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse edit plan TOML: {}", source),
            },
            ConfigError::Json { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse edit plan JSON ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse edit plan JSON: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "invalid edit plan ({}): {}", path.display(), source),
                None => write!(f, "invalid edit plan: {}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

/// Parse and validate a TOML edit plan.
pub fn load_from_str(input: &str) -> Result<EditPlan, ConfigError> {
    let plan: EditPlan = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    validated(plan)
}

/// Parse and validate a JSON edit plan.
pub fn load_json_from_str(input: &str) -> Result<EditPlan, ConfigError> {
    let plan: EditPlan =
        serde_json::from_str(input).map_err(|source| ConfigError::Json { path: None, source })?;
    validated(plan)
}

/// Load a plan from disk; `.json` files are JSON, anything else TOML.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<EditPlan, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let loaded = if is_json {
        load_json_from_str(&contents)
    } else {
        load_from_str(&contents)
    };
    loaded.map_err(|error| error.with_path(path))
}

fn validated(plan: EditPlan) -> Result<EditPlan, ConfigError> {
    plan.validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    tracing::debug!(name = %plan.meta.name, edits = plan.edits.len(), "edit plan loaded");
    Ok(plan)
}
