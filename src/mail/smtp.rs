use mail_send::SmtpClientBuilder;
use mail_send::mail_builder::MessageBuilder;
use tokio::runtime::{Builder, Runtime};

use crate::config::SmtpConfig;
use crate::mail::Deliver;
use crate::mail::error::DeliveryError;
use crate::mail::error::DeliveryError::{CantConnectToSmtpServer, CantSendMessage};
use crate::mail::message::create_message;
use crate::render::RenderedArtifact;
use crate::template::TemplateDescriptor;

type Result<T, E = DeliveryError> = std::result::Result<T, E>;

/// Delivers every certificate through its own STARTTLS session.
/// Sessions are driven to completion one at a time, no connection is reused.
pub struct SmtpMailer<'a> {
    config: &'a SmtpConfig,
    runtime: Runtime,
}

impl<'a> SmtpMailer<'a> {
    pub fn new(config: &'a SmtpConfig) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { config, runtime })
    }

    async fn send(&self, message: MessageBuilder<'_>) -> Result<()> {
        let config = self.config;
        let mut client = SmtpClientBuilder::new(config.host().clone(), *config.port())
            .implicit_tls(false)
            .credentials((config.sender_address().clone(), config.password().clone()))
            .timeout(*config.timeout())
            .connect()
            .await
            .map_err(|e| {
                error!(
                    "Couldn't connect to SMTP server {}:{}\n{e:#?}",
                    config.host(),
                    config.port()
                );
                CantConnectToSmtpServer(e)
            })?;

        let sent = client.send(message).await.map_err(|e| {
            error!("Couldn't send message\n{e:#?}");
            CantSendMessage(e)
        });
        // The session is closed whether the message went through or not.
        if let Err(e) = client.quit().await {
            warn!("Couldn't close SMTP session cleanly\n{e:#?}");
        }

        sent
    }
}

impl Deliver for SmtpMailer<'_> {
    fn deliver(&self, artifact: &RenderedArtifact, descriptor: &TemplateDescriptor) -> Result<()> {
        let message = create_message(self.config, artifact, descriptor)?;
        self.runtime.block_on(self.send(message))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::recipient::Recipient;
    use crate::tools::test::tests::temp_dir;

    fn create_artifact() -> RenderedArtifact {
        let path = temp_dir().join("Alice Smith.png");
        fs::write(&path, b"certificate").unwrap();
        let recipient = Recipient::try_new("Alice Smith", "alice@example.com", None).unwrap();
        RenderedArtifact::new(path, recipient, false)
    }

    #[test]
    fn should_fail_to_connect_when_nobody_listens() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = SmtpConfig::new_test_with_server("127.0.0.1", port, Duration::from_secs(2));
        let mailer = SmtpMailer::new(&config).unwrap();

        let result = mailer.deliver(&create_artifact(), &TemplateDescriptor::default());

        assert!(matches!(result, Err(CantConnectToSmtpServer(_))));
    }

    #[test]
    fn should_not_connect_when_attachment_is_missing() {
        let config = SmtpConfig::new_test();
        let mailer = SmtpMailer::new(&config).unwrap();
        let recipient = Recipient::try_new("Alice Smith", "alice@example.com", None).unwrap();
        let artifact = RenderedArtifact::new(PathBuf::from("missing.png"), recipient, false);

        let result = mailer.deliver(&artifact, &TemplateDescriptor::default());

        assert!(matches!(result, Err(DeliveryError::AttachmentUnreadable { .. })));
    }

    /// Needs a reachable SMTP sandbox and real credentials.
    #[test]
    #[ignore]
    fn should_send_email() {
        let config = SmtpConfig::new_test_with_server(
            "sandbox.smtp.mailtrap.io",
            587,
            Duration::from_secs(30),
        );
        let mailer = SmtpMailer::new(&config).unwrap();

        mailer
            .deliver(&create_artifact(), &TemplateDescriptor::default())
            .unwrap();
    }
}
