// Rasterises the pixel-space drawing primitives onto a ratatui cell buffer.
// One cell covers glyph_width x glyph_height pixels.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as CellColor, Modifier, Style};

use super::{FontStyle, MonospaceMetrics, RectStyle, Surface, TextBitmap, TextMetrics};
use crate::geometry::{Color, Point, Rect, Size};

pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: CellRect,
    metrics: MonospaceMetrics,
    /// Visible screen in pixels; drawing outside it is discarded
    screen: Size,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buffer: &'a mut Buffer, area: CellRect, metrics: MonospaceMetrics, screen: Size) -> Self {
        Self {
            buffer,
            area,
            metrics,
            screen,
        }
    }

    fn cell(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        if col >= i32::from(self.area.width) || row >= i32::from(self.area.height) {
            return None;
        }
        if col * self.metrics.glyph_width >= self.screen.width
            || row * self.metrics.glyph_height >= self.screen.height
        {
            return None;
        }
        let x = self.area.x + col as u16;
        let y = self.area.y + row as u16;
        self.buffer.cell_mut((x, y))
    }

    /// Inclusive cell span covered by a pixel span `[start, start + len)`
    fn cell_span(start: i32, len: i32, cell: i32) -> (i32, i32) {
        (start.div_euclid(cell), (start + len - 1).div_euclid(cell))
    }
}

fn to_cell_color(color: Color) -> CellColor {
    CellColor::Rgb(color.r, color.g, color.b)
}

impl TextMetrics for TerminalSurface<'_> {
    fn text_size(&self, text: &str, style: FontStyle) -> Size {
        self.metrics.text_size(text, style)
    }
}

impl Surface for TerminalSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color, style: RectStyle) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let (col0, col1) = Self::cell_span(rect.x, rect.width, self.metrics.glyph_width);
        let (row0, row1) = Self::cell_span(rect.y, rect.height, self.metrics.glyph_height);
        let paint = to_cell_color(color);

        for row in row0..=row1 {
            for col in col0..=col1 {
                let on_edge = row == row0 || row == row1 || col == col0 || col == col1;
                match style.outline {
                    None => {
                        if let Some(cell) = self.cell(col, row) {
                            cell.set_char(' ').set_bg(paint);
                        }
                    }
                    Some(_) if on_edge => {
                        let glyph = match (row == row0, row == row1, col == col0, col == col1) {
                            (true, _, true, _) => if style.radius > 0 { '╭' } else { '┌' },
                            (true, _, _, true) => if style.radius > 0 { '╮' } else { '┐' },
                            (_, true, true, _) => if style.radius > 0 { '╰' } else { '└' },
                            (_, true, _, true) => if style.radius > 0 { '╯' } else { '┘' },
                            (true, _, _, _) | (_, true, _, _) => '─',
                            _ => '│',
                        };
                        if let Some(cell) = self.cell(col, row) {
                            cell.set_char(glyph).set_fg(paint);
                        }
                    }
                    Some(_) => {}
                }
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, _width: i32) {
        let gw = self.metrics.glyph_width;
        let gh = self.metrics.glyph_height;
        let (c0, r0) = (from.x.div_euclid(gw), from.y.div_euclid(gh));
        let (c1, r1) = (to.x.div_euclid(gw), to.y.div_euclid(gh));
        let glyph = if r0 == r1 { '─' } else if c0 == c1 { '│' } else { '·' };
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);
        let paint = to_cell_color(color);

        for step in 0..=steps {
            let col = c0 + (c1 - c0) * step / steps;
            let row = r0 + (r1 - r0) * step / steps;
            if let Some(cell) = self.cell(col, row) {
                cell.set_char(glyph).set_fg(paint);
            }
        }
    }

    fn blit(&mut self, bitmap: &TextBitmap, at: Point) {
        let col0 = at.x.div_euclid(self.metrics.glyph_width);
        let row = at.y.div_euclid(self.metrics.glyph_height);
        let paint = to_cell_color(bitmap.color);

        for (i, ch) in bitmap.text.chars().enumerate() {
            if let Some(cell) = self.cell(col0 + i as i32, row) {
                cell.set_char(ch).set_fg(paint);
                if bitmap.style == FontStyle::Bold {
                    cell.set_style(Style::default().add_modifier(Modifier::BOLD));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_text_land_in_cells() {
        let area = CellRect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        {
            let mut surface =
                TerminalSurface::new(&mut buffer, area, MonospaceMetrics::new(8, 16), Size::new(80, 64));
            surface.fill_rect(Rect::new(8, 16, 16, 16), Color::rgb(1, 2, 3), RectStyle::FILL);
            surface.draw_text("hi", Point::new(8, 16), Color::WHITE, FontStyle::Regular);
        }
        let cell = buffer.cell((1u16, 1u16)).map(|c| (c.symbol().to_string(), c.bg));
        assert_eq!(cell, Some(("h".to_string(), CellColor::Rgb(1, 2, 3))));
        let cell = buffer.cell((2u16, 1u16)).map(|c| c.symbol().to_string());
        assert_eq!(cell, Some("i".to_string()));
        // Untouched neighbour
        let cell = buffer.cell((3u16, 1u16)).map(|c| c.bg);
        assert_eq!(cell, Some(CellColor::Reset));
    }

    #[test]
    fn test_drawing_outside_screen_is_clipped() {
        let area = CellRect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        {
            let mut surface =
                TerminalSurface::new(&mut buffer, area, MonospaceMetrics::new(8, 16), Size::new(16, 16));
            surface.fill_rect(Rect::new(0, 0, 80, 64), Color::rgb(9, 9, 9), RectStyle::FILL);
        }
        assert_eq!(buffer.cell((1u16, 0u16)).map(|c| c.bg), Some(CellColor::Rgb(9, 9, 9)));
        assert_eq!(buffer.cell((2u16, 0u16)).map(|c| c.bg), Some(CellColor::Reset));
        assert_eq!(buffer.cell((0u16, 1u16)).map(|c| c.bg), Some(CellColor::Reset));
    }
}
