use std::fs;

use mail_send::mail_builder::MessageBuilder;
use mail_send::mail_builder::headers::address::Address;

use crate::config::SmtpConfig;
use crate::mail::error::DeliveryError;
use crate::mail::error::DeliveryError::{AttachmentUnreadable, MalformedBody, MalformedSubject};
use crate::render::RenderedArtifact;
use crate::template::TemplateDescriptor;

pub const ATTACHMENT_CONTENT_TYPE: &str = "image/png";

pub fn create_message(
    smtp_config: &SmtpConfig,
    artifact: &RenderedArtifact,
    descriptor: &TemplateDescriptor,
) -> Result<MessageBuilder<'static>, DeliveryError> {
    let recipient = artifact.recipient();
    let subject = descriptor
        .render_subject(recipient.name())
        .map_err(MalformedSubject)?;
    let body = descriptor
        .render_body(recipient.name())
        .map_err(MalformedBody)?;
    let attachment = fs::read(artifact.path()).map_err(|source| AttachmentUnreadable {
        path: artifact.path().clone(),
        source,
    })?;

    Ok(MessageBuilder::new()
        .from(sender(smtp_config))
        .to(recipient.email().clone())
        .subject(subject)
        .text_body(body)
        .attachment(ATTACHMENT_CONTENT_TYPE, artifact.filename(), attachment))
}

fn sender(smtp_config: &SmtpConfig) -> Address<'static> {
    let address = smtp_config.sender_address().clone();
    match smtp_config.sender_name() {
        Some(name) => Address::from((name.clone(), address)),
        None => Address::from(address),
    }
}
