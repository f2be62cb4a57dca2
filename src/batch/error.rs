use std::error::Error as StdError;

use thiserror::Error;

use crate::mail::error::DeliveryError;
use crate::render::error::RenderError;
use crate::template::error::TemplateError;

#[derive(Debug, Error)]
pub enum FailureReason {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl FailureReason {
    /// One line message with every underlying cause.
    pub fn describe(&self) -> String {
        let mut description = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            description.push_str(&format!(" [caused by: {cause}]"));
            source = cause.source();
        }
        description
    }
}
