use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};

use crate::render::builtin_font::BuiltinFont;
use crate::render::text::{TextBounds, blend_pixel};
use crate::template::is_usable_font_size;
use crate::tools::log_message;

/// Fonts commonly found on Linux, macOS & Windows, tried in order.
pub const SYSTEM_FONT_CANDIDATES: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerif.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Outcome of font resolution.
/// `Fallback` means the text won't have the size the template asks for.
pub enum ResolvedFont {
    Loaded {
        font: Font<'static>,
        size: f32,
        path: PathBuf,
    },
    Fallback(BuiltinFont),
}

impl Debug for ResolvedFont {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedFont::Loaded { size, path, .. } => f
                .debug_struct("Loaded")
                .field("size", size)
                .field("path", path)
                .finish(),
            ResolvedFont::Fallback(font) => f.debug_tuple("Fallback").field(font).finish(),
        }
    }
}

impl ResolvedFont {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ResolvedFont::Fallback(_))
    }

    /// Exact ink bounds of the text when drawn from (0, 0), `None` if nothing would be drawn.
    pub fn measure(&self, text: &str) -> Option<TextBounds> {
        match self {
            ResolvedFont::Loaded { font, size, .. } => {
                let scale = Scale::uniform(*size);
                let ascent = font.v_metrics(scale).ascent;
                font.layout(text, scale, point(0.0, ascent))
                    .filter_map(|glyph| glyph.pixel_bounding_box())
                    .map(|rect| TextBounds {
                        min_x: rect.min.x,
                        min_y: rect.min.y,
                        max_x: rect.max.x,
                        max_y: rect.max.y,
                    })
                    .reduce(TextBounds::union)
            }
            ResolvedFont::Fallback(font) => font.measure(text),
        }
    }

    /// Draw the text with its line box top-left corner at (x, y).
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        match self {
            ResolvedFont::Loaded { font, size, .. } => {
                let scale = Scale::uniform(*size);
                let ascent = font.v_metrics(scale).ascent;
                for glyph in font.layout(text, scale, point(x as f32, y as f32 + ascent)) {
                    if let Some(rect) = glyph.pixel_bounding_box() {
                        glyph.draw(|glyph_x, glyph_y, coverage| {
                            blend_pixel(
                                canvas,
                                rect.min.x.saturating_add(glyph_x as i32),
                                rect.min.y.saturating_add(glyph_y as i32),
                                color,
                                coverage,
                            )
                        });
                    }
                }
            }
            ResolvedFont::Fallback(font) => font.draw(canvas, x, y, color, text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FontResolver {
    candidates: Vec<PathBuf>,
}

impl FontResolver {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn system() -> Self {
        Self::new(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect())
    }

    pub fn resolve(&self, requested: Option<&Path>, size: f32) -> ResolvedFont {
        if !is_usable_font_size(size) {
            warn!("Font size {size} can't be used, falling back to the built-in font.");
            return ResolvedFont::Fallback(BuiltinFont);
        }

        if let Some(requested) = requested {
            if let Some(font) = load_font(requested) {
                return ResolvedFont::Loaded {
                    font,
                    size,
                    path: requested.to_path_buf(),
                };
            }
            warn!("Font {requested:?} can't be loaded, looking for a system font.");
        }

        self.candidates
            .iter()
            .find_map(|path| {
                load_font(path).map(|font| ResolvedFont::Loaded {
                    font,
                    size,
                    path: path.clone(),
                })
            })
            .unwrap_or(ResolvedFont::Fallback(BuiltinFont))
    }
}

fn load_font(path: &Path) -> Option<Font<'static>> {
    if !path.is_file() {
        return None;
    }
    let bytes = fs::read(path)
        .map_err(log_message(&format!("Can't read font file {path:?}")))
        .ok()?;
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        debug!("{path:?} isn't a usable TrueType font.");
    }
    font
}
