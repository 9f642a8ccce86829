use tracing::{debug, info};

use self::window::{DraggableWindow, Window, WindowId};
use crate::geometry::{Point, Rect, ScreenGeometry, Size};
use crate::input_handler::InputEvent;
use crate::popup::EventOutcome;
use crate::surface::Surface;

pub mod taskbar;
pub mod window;

/// What happened while one event was routed through the window stack
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Window that claimed the event; it is now topmost
    pub selected: Option<WindowId>,
    /// Window that minimized itself from its title bar
    pub minimized: Option<WindowId>,
}

/// Owns every top-level window. Vector order is z-order: last = topmost.
#[derive(Debug, Default)]
pub struct WindowManager {
    windows: Vec<DraggableWindow>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
        }
    }

    /// Create a window on top of the stack
    pub fn spawn_window(&mut self, title: impl Into<String>, rect: Rect) -> WindowId {
        self.add(DraggableWindow::new(title, rect))
    }

    /// Append a window; it becomes topmost
    pub fn add(&mut self, window: DraggableWindow) -> WindowId {
        let id = window.id();
        info!("[WindowManager] added '{}' ({}) at {:?}", window.title, id, window.rect());
        self.windows.push(window);
        id
    }

    /// Remove by identity; `None` if it was not here
    pub fn remove(&mut self, id: WindowId) -> Option<DraggableWindow> {
        let index = self.index_of(id)?;
        let removed = self.windows.remove(index);
        info!("[WindowManager] removed '{}' ({})", removed.title, id);
        Some(removed)
    }

    /// Move a window to the top of the stack. Idempotent; false if absent.
    pub fn bring_to_front(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index + 1 != self.windows.len() {
            let window = self.windows.remove(index);
            debug!("[WindowManager] brought '{}' to front", window.title);
            self.windows.push(window);
        }
        true
    }

    pub fn get(&self, id: WindowId) -> Option<&DraggableWindow> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut DraggableWindow> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows bottom-to-top
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DraggableWindow> {
        self.windows.iter()
    }

    /// Ids bottom-to-top
    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id()).collect()
    }

    pub fn topmost(&self) -> Option<&DraggableWindow> {
        self.windows.last()
    }

    /// Topmost visible window whose rectangle contains `point`
    pub fn topmost_at(&self, point: Point) -> Option<WindowId> {
        self.windows
            .iter()
            .rev()
            .find(|w| !w.is_minimized() && w.rect().contains(point))
            .map(|w| w.id())
    }

    /// Offer the event to each window from the top down until one ends up
    /// selected; that window is raised. A window that minimizes or maximizes
    /// itself does not claim the event, so the windows below still see it.
    pub fn dispatch(&mut self, event: &InputEvent, screen: &ScreenGeometry) -> Dispatch {
        let mut report = Dispatch::default();

        for index in (0..self.windows.len()).rev() {
            let window = &mut self.windows[index];
            let outcome = window.handle_event(event, screen);
            let id = window.id();

            match outcome {
                EventOutcome::Minimized => {
                    info!("[WindowManager] '{}' minimized", window.title);
                    report.minimized = Some(id);
                }
                EventOutcome::Maximized => {
                    info!(
                        "[WindowManager] '{}' maximize toggled (maximized: {})",
                        window.title,
                        window.is_maximized()
                    );
                }
                _ => {}
            }

            if window.is_selected() {
                self.bring_to_front(id);
                report.selected = Some(id);
                break;
            }
        }

        report
    }

    /// Rescale every window after the screen changed from `from` to `screen.size`
    pub fn relayout(&mut self, from: Size, screen: &ScreenGeometry) {
        for window in &mut self.windows {
            window.relayout(from, screen);
        }
    }

    /// Draw bottom-to-top so the topmost window lands last
    pub fn draw(&self, surface: &mut dyn Surface) {
        for window in &self.windows {
            window.draw(surface);
        }
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_handler::MouseButton;
    use crate::surface::{MonospaceMetrics, RecordingSurface};

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(Size::new(800, 600), 40)
    }

    fn titles(manager: &WindowManager) -> Vec<String> {
        manager.iter().map(|w| w.title.clone()).collect()
    }

    #[test]
    fn test_add_and_remove_by_identity() {
        let mut manager = WindowManager::new();
        let a = manager.spawn_window("A", Rect::new(0, 0, 300, 200));
        let b = manager.spawn_window("A", Rect::new(0, 0, 300, 200));
        assert_eq!(manager.len(), 2);

        let removed = manager.remove(a).map(|w| w.id());
        assert_eq!(removed, Some(a));
        assert!(manager.remove(a).is_none());
        assert_eq!(manager.ids(), vec![b]);
    }

    #[test]
    fn test_bring_to_front_is_idempotent() {
        let mut manager = WindowManager::new();
        let a = manager.spawn_window("A", Rect::new(0, 0, 300, 200));
        manager.spawn_window("B", Rect::new(0, 0, 300, 200));
        manager.spawn_window("C", Rect::new(0, 0, 300, 200));

        assert!(manager.bring_to_front(a));
        let once = titles(&manager);
        assert!(manager.bring_to_front(a));
        assert_eq!(titles(&manager), once);
        assert_eq!(once, vec!["B", "C", "A"]);
        assert!(!manager.bring_to_front(WindowId::new()));
    }

    #[test]
    fn test_dispatch_stops_at_topmost_claimant() {
        let mut manager = WindowManager::new();
        let bottom = manager.spawn_window("Bottom", Rect::new(100, 100, 300, 200));
        let top = manager.spawn_window("Top", Rect::new(150, 150, 300, 200));

        // Overlap: the top window claims it
        let report = manager.dispatch(&InputEvent::press(MouseButton::Left, 200, 200), &screen());
        assert_eq!(report.selected, Some(top));
        assert!(!manager.get(bottom).unwrap().is_selected());
        manager.dispatch(&InputEvent::release(MouseButton::Left, 200, 200), &screen());

        // Only the bottom window is under the cursor: it is raised
        let report = manager.dispatch(&InputEvent::press(MouseButton::Left, 110, 140), &screen());
        assert_eq!(report.selected, Some(bottom));
        assert_eq!(manager.topmost().map(|w| w.id()), Some(bottom));
    }

    #[test]
    fn test_minimize_click_falls_through_to_window_below() {
        let mut manager = WindowManager::new();
        let bottom = manager.spawn_window("Bottom", Rect::new(200, 100, 300, 200));
        let top = manager.spawn_window("Top", Rect::new(150, 150, 300, 200));
        let button = manager.get(top).unwrap().minimize_button().center();
        assert_eq!(button, Point::new(410, 165));

        let report = manager.dispatch(&InputEvent::press(MouseButton::Left, button.x, button.y), &screen());
        assert_eq!(report.minimized, Some(top));
        assert_eq!(report.selected, Some(bottom));
        assert!(manager.get(top).unwrap().is_minimized());
        assert!(manager.get(bottom).unwrap().is_selected());
        assert_eq!(manager.topmost().unwrap().id(), bottom);
    }

    #[test]
    fn test_minimize_click_with_nothing_below() {
        let mut manager = WindowManager::new();
        let only = manager.spawn_window("Only", Rect::new(100, 100, 300, 200));
        let button = manager.get(only).unwrap().minimize_button().center();

        let report = manager.dispatch(&InputEvent::press(MouseButton::Left, button.x, button.y), &screen());
        assert_eq!(report.minimized, Some(only));
        assert_eq!(report.selected, None);
    }

    #[test]
    fn test_topmost_at_skips_minimized() {
        let mut manager = WindowManager::new();
        let bottom = manager.spawn_window("Bottom", Rect::new(100, 100, 300, 200));
        let top = manager.spawn_window("Top", Rect::new(100, 100, 300, 200));
        assert_eq!(manager.topmost_at(Point::new(200, 200)), Some(top));
        manager.get_mut(top).unwrap().minimize();
        assert_eq!(manager.topmost_at(Point::new(200, 200)), Some(bottom));
        assert_eq!(manager.topmost_at(Point::new(10, 10)), None);
    }

    #[test]
    fn test_draw_is_bottom_to_top() {
        let mut manager = WindowManager::new();
        manager.spawn_window("Back", Rect::new(0, 0, 300, 200));
        manager.spawn_window("Front", Rect::new(0, 0, 300, 200));
        let mut surface = RecordingSurface::new(MonospaceMetrics::default());
        manager.draw(&mut surface);
        assert_eq!(surface.texts(), vec!["Back", "Front"]);
    }
}
