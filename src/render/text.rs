use image::{Rgba, RgbaImage};

/// Pixel area covered by ink, relative to the point text is drawn from.
/// `max_x` & `max_y` are exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y).max(0) as u32
    }

    pub fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Paint `color` over one pixel with the given coverage (0 to 1).
/// Pixels outside the canvas are ignored.
pub fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * f32::from(color.0[3]) / 255.0;
    if alpha <= 0.0 {
        return;
    }

    let destination = canvas.get_pixel_mut(x, y);
    let inverse = 1.0 - alpha;
    for channel in 0..3 {
        destination.0[channel] = (f32::from(color.0[channel]) * alpha
            + f32::from(destination.0[channel]) * inverse)
            .round() as u8;
    }
    let destination_alpha = f32::from(destination.0[3]) / 255.0;
    destination.0[3] = ((alpha + destination_alpha * inverse) * 255.0).round() as u8;
}
