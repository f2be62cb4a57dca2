use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::SAMPLE_CONFIG;
use crate::config::error::ConfigError;
use crate::recipient::error::RecipientError;
use crate::template::MAX_FONT_SIZE;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to read recipients: {0}")]
    Input(#[from] RecipientError),
    #[error("No recipients found in {0}. Exiting.")]
    NoRecipients(PathBuf),
    #[error("Can't read the confirmation answer")]
    Confirmation(#[source] io::Error),
    #[error("Can't start the mail client")]
    MailerSetup(#[source] io::Error),
}

impl ApplicationError {
    pub fn hint(&self) -> Option<String> {
        match self {
            ApplicationError::Config(ConfigError::Template(_)) => Some(format!(
                "Check the `templates` section of the config file: \
                 font sizes go up to {MAX_FONT_SIZE}, \
                 subjects & bodies must be valid templates using `{{{{ name }}}}`."
            )),
            ApplicationError::Config(_) => Some(format!(
                "Create a config file with contents like:\n{SAMPLE_CONFIG}"
            )),
            ApplicationError::Input(_) | ApplicationError::NoRecipients(_) => Some(
                "Provide a CSV file with `name,email` rows, optionally followed by a group column, \
                 e.g. --recipients=data.csv"
                    .to_owned(),
            ),
            ApplicationError::Confirmation(_) | ApplicationError::MailerSetup(_) => None,
        }
    }
}
