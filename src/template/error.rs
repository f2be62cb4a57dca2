use thiserror::Error;

use crate::template::MAX_FONT_SIZE;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("No template found for group `{0}`.")]
    NotFound(String),
    #[error("Recipient has no group and no default group is configured.")]
    NoGroup,
    #[error("The default group `{0}` doesn't match any template.")]
    UnknownDefaultGroup(String),
    #[error(
        "Font size {size} of group `{group}` must be above 0 and at most {max}.",
        max = MAX_FONT_SIZE
    )]
    InvalidFontSize { group: String, size: f32 },
    #[error("No template has been configured.")]
    EmptyRegistry,
    #[error("The {field} template of group `{group}` is malformed.")]
    MalformedTemplate {
        group: String,
        field: &'static str,
        #[source]
        source: tera::Error,
    },
}
