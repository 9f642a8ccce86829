use tracing::info;

use super::window::{Window, WindowId};
use super::WindowManager;
use crate::geometry::{Color, Point, Rect, ScreenGeometry};
use crate::input_handler::InputEvent;
use crate::surface::{FontStyle, RectStyle, Surface};

const TASKBAR_COLOR: Color = Color::rgb(50, 50, 50);
const BUTTON_COLOR: Color = Color::rgb(100, 100, 100);
const BUTTON_WIDTH: i32 = 100;
const BUTTON_SPACING: i32 = 10;

/// Strip pinned to the bottom of the screen with one button per minimized window
#[derive(Debug)]
pub struct Taskbar {
    rect: Rect,
    /// Insertion order is button order
    minimized: Vec<WindowId>,
}

impl Taskbar {
    pub fn new(screen: &ScreenGeometry) -> Self {
        Self {
            rect: screen.taskbar_rect(),
            minimized: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Re-pin to the bottom of a resized screen
    pub fn relayout(&mut self, screen: &ScreenGeometry) {
        self.rect = screen.taskbar_rect();
    }

    pub fn windows(&self) -> &[WindowId] {
        &self.minimized
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.minimized.contains(&id)
    }

    /// Add a button at the end; no-op if already present
    pub fn add(&mut self, id: WindowId) {
        if !self.contains(id) {
            self.minimized.push(id);
        }
    }

    pub fn remove(&mut self, id: WindowId) -> bool {
        let before = self.minimized.len();
        self.minimized.retain(|w| *w != id);
        before != self.minimized.len()
    }

    pub fn button_rect(&self, index: usize) -> Rect {
        Rect::new(
            BUTTON_SPACING + index as i32 * (BUTTON_WIDTH + BUTTON_SPACING),
            self.rect.y + 5,
            BUTTON_WIDTH,
            self.rect.height - 10,
        )
    }

    pub fn button_at(&self, point: Point) -> Option<WindowId> {
        self.minimized
            .iter()
            .enumerate()
            .find(|(index, _)| self.button_rect(*index).contains(point))
            .map(|(_, id)| *id)
    }

    /// A left click on a button restores that window, drops its button and
    /// raises it. Returns the restored window.
    pub fn handle_event(&mut self, event: &InputEvent, windows: &mut WindowManager) -> Option<WindowId> {
        let pos = event.is_left_press()?;
        let id = self.button_at(pos)?;
        self.remove(id);

        let window = windows.get_mut(id)?;
        window.restore();
        info!("[Taskbar] restored '{}' to {:?}", window.title, window.rect());
        windows.bring_to_front(id);
        Some(id)
    }

    pub fn draw(&self, surface: &mut dyn Surface, windows: &WindowManager) {
        surface.fill_rect(self.rect, TASKBAR_COLOR, RectStyle::FILL);

        for (index, id) in self.minimized.iter().enumerate() {
            let button = self.button_rect(index);
            surface.fill_rect(button, BUTTON_COLOR, RectStyle::FILL);
            surface.fill_rect(button, Color::WHITE, RectStyle::outline(2));
            if let Some(window) = windows.get(*id) {
                surface.draw_text(
                    window.title(),
                    Point::new(button.x + 5, button.y + 10),
                    Color::WHITE,
                    FontStyle::Regular,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::input_handler::MouseButton;

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(Size::new(800, 600), 40)
    }

    #[test]
    fn test_buttons_laid_out_left_to_right() {
        let mut taskbar = Taskbar::new(&screen());
        let a = WindowId::new();
        let b = WindowId::new();
        taskbar.add(a);
        taskbar.add(b);
        taskbar.add(a);
        assert_eq!(taskbar.windows(), &[a, b]);
        assert_eq!(taskbar.button_rect(0), Rect::new(10, 565, 100, 30));
        assert_eq!(taskbar.button_rect(1), Rect::new(120, 565, 100, 30));
        assert_eq!(taskbar.button_at(Point::new(130, 570)), Some(b));
        assert_eq!(taskbar.button_at(Point::new(115, 570)), None);
    }

    #[test]
    fn test_click_restores_and_raises() {
        let mut windows = WindowManager::new();
        let first = windows.spawn_window("First", Rect::new(100, 100, 300, 200));
        windows.spawn_window("Second", Rect::new(200, 100, 300, 200));
        let mut taskbar = Taskbar::new(&screen());

        windows.get_mut(first).unwrap().minimize();
        taskbar.add(first);

        let restored = taskbar.handle_event(&InputEvent::press(MouseButton::Left, 20, 570), &mut windows);
        assert_eq!(restored, Some(first));
        assert!(taskbar.windows().is_empty());
        assert_eq!(windows.topmost().map(|w| w.id()), Some(first));
        assert!(!windows.get(first).unwrap().is_minimized());
    }

    #[test]
    fn test_relayout_follows_screen() {
        let mut taskbar = Taskbar::new(&screen());
        taskbar.relayout(&ScreenGeometry::new(Size::new(1024, 768), 40));
        assert_eq!(taskbar.rect(), Rect::new(0, 728, 1024, 40));
    }
}
