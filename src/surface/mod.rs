// Drawing surface contract consumed by every draw method

pub mod recording;
pub mod terminal;

use crate::geometry::{Color, Point, Rect, Size};

pub use recording::{DrawOp, RecordingSurface};
pub use terminal::TerminalSurface;

/// Font weight for rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Pixel metrics of rendered text
pub trait TextMetrics {
    /// Width/height in pixels of `text` rendered on a single line
    fn text_size(&self, text: &str, style: FontStyle) -> Size;

    /// Height of one line of text
    fn line_height(&self, style: FontStyle) -> i32 {
        self.text_size("", style).height
    }
}

/// Fixed-pitch metrics: every glyph occupies one `glyph_width` x `glyph_height` cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    pub glyph_width: i32,
    pub glyph_height: i32,
}

impl MonospaceMetrics {
    pub const fn new(glyph_width: i32, glyph_height: i32) -> Self {
        Self {
            glyph_width,
            glyph_height,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_size(&self, text: &str, _style: FontStyle) -> Size {
        Size::new(
            text.chars().count() as i32 * self.glyph_width,
            self.glyph_height,
        )
    }
}

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectStyle {
    /// Corner radius, 0 for square corners
    pub radius: i32,
    /// `Some(width)` strokes the outline only; `None` fills
    pub outline: Option<i32>,
}

impl RectStyle {
    pub const FILL: RectStyle = RectStyle {
        radius: 0,
        outline: None,
    };

    pub const fn outline(width: i32) -> Self {
        Self {
            radius: 0,
            outline: Some(width),
        }
    }

    pub const fn rounded(self, radius: i32) -> Self {
        Self {
            radius,
            outline: self.outline,
        }
    }
}

/// Text rendered once, ready to be blitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBitmap {
    pub text: String,
    pub color: Color,
    pub style: FontStyle,
    pub size: Size,
}

/// Primitive drawing operations. Coordinates are screen pixels.
pub trait Surface: TextMetrics {
    fn fill_rect(&mut self, rect: Rect, color: Color, style: RectStyle);

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: i32);

    /// Place previously rendered text with its top-left corner at `at`
    fn blit(&mut self, bitmap: &TextBitmap, at: Point);

    /// Render `text` to a bitmap whose size comes from the surface metrics
    fn render_text(&mut self, text: &str, color: Color, style: FontStyle) -> TextBitmap {
        TextBitmap {
            text: text.to_string(),
            color,
            style,
            size: self.text_size(text, style),
        }
    }

    /// Render and blit in one step, returning the rendered size
    fn draw_text(&mut self, text: &str, at: Point, color: Color, style: FontStyle) -> Size {
        let bitmap = self.render_text(text, color, style);
        self.blit(&bitmap, at);
        bitmap.size
    }
}
