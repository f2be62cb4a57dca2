use std::path::PathBuf;

use derive_getters::Getters;
use image::Rgba;
use serde::Deserialize;
use tera::{Context, Tera};

pub mod error;
pub mod registry;

pub const DEFAULT_TEMPLATE_IMAGE: &str = "certificates/template.png";
pub const DEFAULT_FONT_SIZE: f32 = 80.0;
/// In px. Glyphs are rasterized whole.
pub const MAX_FONT_SIZE: f32 = 2000.0;
pub const DEFAULT_TEXT_Y: i32 = 580;
pub const DEFAULT_TEXT_COLOR: Rgba<u8> = Rgba([10, 10, 10, 255]);
pub const DEFAULT_SUBJECT: &str = "Certificate of Achievement - {{ name }}";
pub const DEFAULT_BODY: &str = "Dear {{ name }},\n\
Thank you for participating in the event. \
Your certificate of participation has been attached to this email.\n\n\
Regards";
pub const NAME_VARIABLE: &str = "name";

/// Everything needed to turn a name into a certificate and an email.
/// Loaded once, then shared read-only by the whole batch.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct TemplateDescriptor {
    image: PathBuf,
    #[serde(default)]
    font: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    font_size: f32,
    #[serde(default = "default_color", deserialize_with = "color_format::deserialize")]
    color: Rgba<u8>,
    #[serde(default = "default_y")]
    y: i32,
    #[serde(default = "default_shadow")]
    shadow: bool,
    #[serde(default = "default_subject")]
    subject: String,
    #[serde(default = "default_body")]
    body: String,
}

impl Default for TemplateDescriptor {
    fn default() -> Self {
        Self::with_image(PathBuf::from(DEFAULT_TEMPLATE_IMAGE))
    }
}

impl TemplateDescriptor {
    pub fn with_image(image: PathBuf) -> Self {
        Self {
            image,
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_TEXT_COLOR,
            y: DEFAULT_TEXT_Y,
            shadow: true,
            subject: DEFAULT_SUBJECT.to_owned(),
            body: DEFAULT_BODY.to_owned(),
        }
    }

    pub fn has_usable_font_size(&self) -> bool {
        is_usable_font_size(self.font_size)
    }

    pub fn render_subject(&self, name: &str) -> tera::Result<String> {
        render_with_name(&self.subject, name)
    }

    pub fn render_body(&self, name: &str) -> tera::Result<String> {
        render_with_name(&self.body, name)
    }
}

#[cfg(test)]
impl TemplateDescriptor {
    pub fn new_test(image: PathBuf, color: Rgba<u8>, y: i32, shadow: bool) -> Self {
        Self {
            color,
            y,
            shadow,
            ..Self::with_image(image)
        }
    }

    pub fn with_font(self, font: PathBuf, font_size: f32) -> Self {
        Self {
            font: Some(font),
            font_size,
            ..self
        }
    }
}

pub fn is_usable_font_size(size: f32) -> bool {
    size.is_finite() && size > 0.0 && size <= MAX_FONT_SIZE
}

fn render_with_name(template: &str, name: &str) -> tera::Result<String> {
    let mut context = Context::new();
    context.insert(NAME_VARIABLE, name);
    Tera::one_off(template, &context, false)
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_color() -> Rgba<u8> {
    DEFAULT_TEXT_COLOR
}

fn default_y() -> i32 {
    DEFAULT_TEXT_Y
}

fn default_shadow() -> bool {
    true
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_owned()
}

fn default_body() -> String {
    DEFAULT_BODY.to_owned()
}

pub mod color_format {
    use image::Rgba;
    use serde::{Deserialize, Deserializer, de};

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn parse(value: &str) -> Option<Rgba<u8>> {
        let hex = value.trim().trim_start_matches('#');
        let bytes = hex::decode(hex).ok()?;
        match bytes.as_slice() {
            [r, g, b] => Some(Rgba([*r, *g, *b, 255])),
            [r, g, b, a] => Some(Rgba([*r, *g, *b, *a])),
            _ => None,
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Rgba<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"a color such as #0a0a0a")
        })
    }
}
