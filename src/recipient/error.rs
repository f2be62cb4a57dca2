use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipientError {
    #[error("Recipients file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Can't read recipients file {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The recipients file has an unexpected encoding [error: {0}]")]
    WrongEncoding(Cow<'static, str>),
}

impl From<Cow<'static, str>> for RecipientError {
    fn from(value: Cow<'static, str>) -> Self {
        RecipientError::WrongEncoding(value)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RowRejection {
    #[error("need name,email [fields: {0}]")]
    TooFewFields(usize),
    #[error("empty name")]
    EmptyName,
    #[error("empty email")]
    EmptyEmail,
    #[error("unparsable row [error: {0}]")]
    Malformed(String),
}
