use std::fs;
use std::path::{Path, PathBuf};

use derive_getters::Getters;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::recipient::Recipient;
use crate::render::error::RenderError;
use crate::render::error::RenderError::{
    OutputFolderCreationFailed, SaveFailed, TemplateNotFound, TemplateUnreadable,
};
use crate::render::font::FontResolver;
use crate::render::sanitize::sanitize_filename;
use crate::template::TemplateDescriptor;

pub mod builtin_font;
pub mod error;
pub mod font;
pub mod sanitize;
pub mod text;

type Result<T, E = RenderError> = std::result::Result<T, E>;

pub const SHADOW_OFFSET: i32 = 2;
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 150]);
const CERTIFICATE_EXTENSION: &str = "png";

/// A certificate written to disk for a given recipient.
/// The file stays on disk once the batch is over.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct RenderedArtifact {
    path: PathBuf,
    recipient: Recipient,
    /// Drawn with the built-in font instead of the requested one.
    degraded: bool,
}

impl RenderedArtifact {
    pub fn new(path: PathBuf, recipient: Recipient, degraded: bool) -> Self {
        Self {
            path,
            recipient,
            degraded,
        }
    }

    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|filename| filename.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct Renderer {
    output_dir: PathBuf,
    fonts: FontResolver,
}

impl Renderer {
    pub fn new(output_dir: PathBuf, fonts: FontResolver) -> Self {
        Self { output_dir, fonts }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{CERTIFICATE_EXTENSION}", sanitize_filename(name)))
    }

    pub fn render(
        &self,
        recipient: &Recipient,
        descriptor: &TemplateDescriptor,
    ) -> Result<RenderedArtifact> {
        let template_path = descriptor.image();
        if !template_path.is_file() {
            return Err(TemplateNotFound(template_path.clone()));
        }
        let template = image::open(template_path).map_err(|source| TemplateUnreadable {
            path: template_path.clone(),
            source,
        })?;
        let has_alpha = template.color().has_alpha();
        let mut canvas = template.to_rgba8();

        let font = self
            .fonts
            .resolve(descriptor.font().as_deref(), *descriptor.font_size());
        if font.is_degraded() {
            warn!(
                "No usable font for {recipient}, using the built-in font [requested size: {}]",
                descriptor.font_size()
            );
        }

        let text = recipient.name().trim();
        let bounds = font.measure(text).unwrap_or_default();
        let x = centered_x(canvas.width(), bounds.width());
        let y = *descriptor.y();
        // Shift the drawing origin so that ink, not the pen position, starts at x.
        let origin_x = x.saturating_sub(bounds.min_x);
        debug!(
            "Drawing {text:?} at ({x}, {y}) [text size: {}x{}, image width: {}]",
            bounds.width(),
            bounds.height(),
            canvas.width()
        );

        if *descriptor.shadow() {
            match shadow_origin(origin_x, y) {
                Some((shadow_x, shadow_y)) => {
                    font.draw(&mut canvas, shadow_x, shadow_y, SHADOW_COLOR, text)
                }
                None => warn!("Can't place a shadow at ({origin_x}, {y}), skipping it."),
            }
        }
        font.draw(&mut canvas, origin_x, y, *descriptor.color(), text);

        let certificate = flatten(canvas, has_alpha);
        fs::create_dir_all(&self.output_dir).map_err(|source| OutputFolderCreationFailed {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_path(recipient.name());
        certificate
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| SaveFailed {
                path: path.clone(),
                source,
            })?;

        Ok(RenderedArtifact::new(
            path,
            recipient.clone(),
            font.is_degraded(),
        ))
    }
}

/// Left edge of text of the given width, centered horizontally.
/// Negative when the text is wider than the image.
pub fn centered_x(image_width: u32, text_width: u32) -> i32 {
    let x = (i64::from(image_width) - i64::from(text_width)) / 2;
    x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn shadow_origin(x: i32, y: i32) -> Option<(i32, i32)> {
    Some((
        x.checked_add(SHADOW_OFFSET)?,
        y.checked_add(SHADOW_OFFSET)?,
    ))
}

/// Opaque copy of the canvas, transparency laid onto white.
fn flatten(canvas: RgbaImage, has_alpha: bool) -> RgbImage {
    if !has_alpha {
        return DynamicImage::ImageRgba8(canvas).to_rgb8();
    }

    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgba([red, green, blue, alpha]) = *canvas.get_pixel(x, y);
        let alpha = f32::from(alpha) / 255.0;
        let over_white =
            |channel: u8| (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Rgb([over_white(red), over_white(green), over_white(blue)])
    })
}
