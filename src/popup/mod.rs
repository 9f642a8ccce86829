// Popup family: transient overlays that live on the menu stack.
// Each variant handles its own input; only the top of the stack gets events.

pub mod editable;
pub mod info;
pub mod main_menu;
pub mod menu_stack;
pub mod rgb;

pub use editable::{EditMode, EditablePopupWindow};
pub use info::{HelpWindow, SubmenuWindow};
pub use main_menu::MainMenuWindow;
pub use menu_stack::MenuStack;
pub use rgb::RgbPropertiesWindow;

use crate::geometry::{Point, Rect};
use crate::input_handler::InputEvent;
use crate::state::window::{Window, WindowId};
use crate::state::WindowManager;
use crate::surface::{Surface, TextMetrics};

/// Result of handing one event to a window or popup
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Nothing the caller needs to act on
    NoOp,
    /// The entity took the event (selection, drag, edit focus)
    ClaimedFocus,
    /// A draggable window minimized itself
    Minimized,
    /// A draggable window toggled maximize
    Maximized,
    /// Push this popup on top of the menu stack
    Spawn(Popup),
    /// The popup's target is gone; pop it
    Closed,
}

/// What a popup may touch while handling input
pub struct PopupContext<'a> {
    pub windows: &'a mut WindowManager,
    pub metrics: &'a dyn TextMetrics,
}

/// What a popup may read while drawing
pub struct DrawContext<'a> {
    pub windows: &'a WindowManager,
    /// Last known cursor position, for hover highlights
    pub cursor: Option<Point>,
}

impl DrawContext<'_> {
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.cursor.is_some_and(|p| rect.contains(p))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    MainMenu(MainMenuWindow),
    Editable(EditablePopupWindow),
    Rgb(RgbPropertiesWindow),
    Submenu(SubmenuWindow),
    Help(HelpWindow),
}

impl Popup {
    pub fn kind(&self) -> &'static str {
        match self {
            Popup::MainMenu(_) => "MainMenu",
            Popup::Editable(_) => "EditablePopup",
            Popup::Rgb(_) => "RGBProperties",
            Popup::Submenu(_) => "Submenu",
            Popup::Help(_) => "Help",
        }
    }

    /// Window this popup acts on, if any
    pub fn target(&self) -> Option<WindowId> {
        match self {
            Popup::MainMenu(menu) => Some(menu.target()),
            Popup::Editable(popup) => Some(popup.target()),
            Popup::Rgb(popup) => Some(popup.target()),
            Popup::Submenu(_) | Popup::Help(_) => None,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut PopupContext<'_>) -> EventOutcome {
        match self {
            Popup::MainMenu(menu) => menu.handle_event(event, ctx),
            Popup::Editable(popup) => popup.handle_event(event, ctx),
            Popup::Rgb(popup) => popup.handle_event(event, ctx),
            Popup::Submenu(_) | Popup::Help(_) => EventOutcome::NoOp,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext<'_>) {
        match self {
            Popup::MainMenu(menu) => menu.draw(surface, ctx),
            Popup::Editable(popup) => popup.draw(surface),
            Popup::Rgb(popup) => popup.draw(surface),
            Popup::Submenu(popup) => popup.draw(surface),
            Popup::Help(popup) => popup.draw(surface),
        }
    }

    /// Per-frame housekeeping (caret blink)
    pub fn tick(&mut self) {
        if let Popup::Editable(popup) = self {
            popup.tick();
        }
    }

    /// Re-read whatever the popup mirrors from its target. Returns false once
    /// the target is gone or minimized; the popup must then be closed.
    pub fn refresh(&mut self, windows: &WindowManager) -> bool {
        match self {
            Popup::MainMenu(menu) => menu.refresh(windows),
            Popup::Editable(popup) => popup.refresh(windows),
            Popup::Rgb(popup) => live_target(windows, popup.target()),
            Popup::Submenu(_) | Popup::Help(_) => true,
        }
    }
}

impl Window for Popup {
    fn rect(&self) -> Rect {
        match self {
            Popup::MainMenu(menu) => menu.rect(),
            Popup::Editable(popup) => popup.rect(),
            Popup::Rgb(popup) => popup.rect(),
            Popup::Submenu(popup) => popup.rect(),
            Popup::Help(popup) => popup.rect(),
        }
    }

    fn title(&self) -> &str {
        match self {
            Popup::MainMenu(menu) => menu.title(),
            Popup::Editable(popup) => popup.title(),
            Popup::Rgb(popup) => popup.title(),
            Popup::Submenu(popup) => popup.title(),
            Popup::Help(popup) => popup.title(),
        }
    }
}

/// A popup target is usable while it exists and is not minimized
pub(crate) fn live_target(windows: &WindowManager, id: WindowId) -> bool {
    windows.get(id).is_some_and(|w| !w.is_minimized())
}
