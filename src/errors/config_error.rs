use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid identity pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("bot name '{name}' does not match identity pattern {pattern}")]
    IdentityMismatch { name: String, pattern: String },
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
