// Headless surface that records every primitive in call order

use super::{FontStyle, MonospaceMetrics, RectStyle, Surface, TextBitmap, TextMetrics};
use crate::geometry::{Color, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Color,
        style: RectStyle,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: i32,
    },
    Text {
        text: String,
        at: Point,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    metrics: MonospaceMetrics,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(metrics: MonospaceMetrics) -> Self {
        Self {
            metrics,
            ops: Vec::new(),
        }
    }

    /// All blitted strings, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first text op equal to `text`
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl TextMetrics for RecordingSurface {
    fn text_size(&self, text: &str, style: FontStyle) -> Size {
        self.metrics.text_size(text, style)
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color, style: RectStyle) {
        self.ops.push(DrawOp::Fill { rect, color, style });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: i32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn blit(&mut self, bitmap: &TextBitmap, at: Point) {
        self.ops.push(DrawOp::Text {
            text: bitmap.text.clone(),
            at,
            color: bitmap.color,
        });
    }
}
