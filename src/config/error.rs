use std::path::PathBuf;

use thiserror::Error;

use crate::template::error::TemplateError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing config file: {0}")]
    MissingFile(PathBuf),
    #[error("Can't read config file {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file {path} isn't valid: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing keys in config file: {0:?}")]
    MissingKeys(Vec<&'static str>),
    #[error("SMTP port `{0}` isn't a valid port number")]
    InvalidPort(String),
    #[error("Templates are misconfigured: {0}")]
    Template(#[from] TemplateError),
}
