//! JSON config loading
//!
//! Tuning and settings both live in optional JSON files. A missing or broken
//! file is never fatal: callers fall back to defaults and log why.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to load a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Types that can reject semantically broken values after parsing
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Read and parse a JSON file, then validate it
pub fn load_json_file<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
{
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: T = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    value.validate()?;
    Ok(value)
}

/// Load from the file named by an environment variable, or use defaults
pub fn load_or_default<T>(env_var: &str) -> T
where
    T: DeserializeOwned + Validate + Default,
{
    let Some(path) = std::env::var_os(env_var) else {
        log::debug!("{} not set, using defaults", env_var);
        return T::default();
    };
    let path = PathBuf::from(path);
    match load_json_file(&path) {
        Ok(value) => {
            log::info!("Loaded {} from {}", env_var, path.display());
            value
        }
        Err(err) => {
            log::warn!("{err}; using defaults");
            T::default()
        }
    }
}
