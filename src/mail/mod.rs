use crate::mail::error::DeliveryError;
use crate::render::RenderedArtifact;
use crate::template::TemplateDescriptor;

pub mod error;
pub mod message;
pub mod smtp;

pub trait Deliver {
    fn deliver(
        &self,
        artifact: &RenderedArtifact,
        descriptor: &TemplateDescriptor,
    ) -> Result<(), DeliveryError>;
}
