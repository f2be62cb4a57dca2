use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Can't read certificate {path} to attach it")]
    AttachmentUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Can't fill in the email subject")]
    MalformedSubject(#[source] tera::Error),
    #[error("Can't fill in the email body")]
    MalformedBody(#[source] tera::Error),
    #[error("Can't connect to SMTP server")]
    CantConnectToSmtpServer(#[source] mail_send::Error),
    #[error("Can't send message")]
    CantSendMessage(#[source] mail_send::Error),
}
