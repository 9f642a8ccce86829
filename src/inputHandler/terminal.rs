// Translates crossterm terminal events into desktop input events.
// Cell coordinates become the pixel at the centre of the cell.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermButton, MouseEvent,
    MouseEventKind,
};

use super::types::{InputEvent, Key, Modifiers, MouseButton};
use crate::geometry::Point;
use crate::surface::MonospaceMetrics;

pub struct EventTranslator {
    metrics: MonospaceMetrics,
}

impl EventTranslator {
    pub fn new(metrics: MonospaceMetrics) -> Self {
        Self { metrics }
    }

    /// Pixel position at the centre of a terminal cell
    pub fn cell_to_pixel(&self, column: u16, row: u16) -> Point {
        Point::new(
            i32::from(column) * self.metrics.glyph_width + self.metrics.glyph_width / 2,
            i32::from(row) * self.metrics.glyph_height + self.metrics.glyph_height / 2,
        )
    }

    /// Pixel size of a terminal of `columns` x `rows` cells
    pub fn terminal_pixels(&self, columns: u16, rows: u16) -> (i32, i32) {
        (
            i32::from(columns) * self.metrics.glyph_width,
            i32::from(rows) * self.metrics.glyph_height,
        )
    }

    pub fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            Event::Resize(columns, rows) => {
                let (width, height) = self.terminal_pixels(columns, rows);
                Some(InputEvent::Resize { width, height })
            }
            _ => None,
        }
    }

    fn translate_key(&self, key: KeyEvent) -> Option<InputEvent> {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return None;
        }

        let modifiers = Modifiers {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
            alt: key.modifiers.contains(KeyModifiers::ALT),
        };

        let key = match key.code {
            KeyCode::Char(c) if modifiers.ctrl && matches!(c.to_ascii_lowercase(), 'q' | 'c') => {
                return Some(InputEvent::Quit);
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            _ => Key::Other,
        };

        Some(InputEvent::KeyDown { key, modifiers })
    }

    fn translate_mouse(&self, mouse: MouseEvent) -> Option<InputEvent> {
        let pos = self.cell_to_pixel(mouse.column, mouse.row);
        let button = |b: TermButton| match b {
            TermButton::Left => MouseButton::Left,
            TermButton::Middle => MouseButton::Middle,
            TermButton::Right => MouseButton::Right,
        };

        match mouse.kind {
            MouseEventKind::Down(b) => Some(InputEvent::MouseButtonDown {
                button: button(b),
                pos,
            }),
            MouseEventKind::Up(b) => Some(InputEvent::MouseButtonUp {
                button: button(b),
                pos,
            }),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(InputEvent::MouseMotion { pos }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn translator() -> EventTranslator {
        EventTranslator::new(MonospaceMetrics::new(8, 16))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_mouse_cells_map_to_pixel_centres() {
        let event = translator().translate(mouse(MouseEventKind::Down(TermButton::Right), 2, 3));
        assert_eq!(
            event,
            Some(InputEvent::MouseButtonDown {
                button: MouseButton::Right,
                pos: Point::new(20, 56),
            })
        );

        let event = translator().translate(mouse(MouseEventKind::Drag(TermButton::Left), 0, 0));
        assert_eq!(event, Some(InputEvent::motion(4, 8)));
    }

    #[test]
    fn test_resize_reports_pixels() {
        let event = translator().translate(Event::Resize(100, 40));
        assert_eq!(
            event,
            Some(InputEvent::Resize {
                width: 800,
                height: 640,
            })
        );
    }

    #[test]
    fn test_ctrl_q_quits_and_ctrl_n_passes_through() {
        let key = |c| {
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            })
        };
        assert_eq!(translator().translate(key('q')), Some(InputEvent::Quit));
        assert_eq!(translator().translate(key('n')), Some(InputEvent::ctrl('n')));
    }
}
