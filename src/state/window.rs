use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::geometry::layout::{clamp_move, relayout_rect, try_resize};
use crate::geometry::{Color, Point, Rect, ScreenGeometry, Size};
use crate::input_handler::{InputEvent, MouseButton};
use crate::popup::EventOutcome;
use crate::surface::{FontStyle, RectStyle, Surface};

pub const DEFAULT_WINDOW_COLOR: Color = Color::rgb(100, 100, 250);
pub const TITLE_BAR_HEIGHT: i32 = 30;
const TITLE_BAR_COLOR: Color = Color::rgb(70, 130, 180);
const SHADOW_COLOR: Color = Color::rgb(15, 15, 15);
const BUTTON_SIZE: i32 = 20;
const BUTTON_MARGIN: i32 = 5;
const RESIZE_HANDLE_SIZE: i32 = 10;
const CORNER_RADIUS: i32 = 5;

/// Stable handle to a top-level window
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(Uuid);

impl WindowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// Stable handle to one dynamic option record
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct OptionId(Uuid);

impl OptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OptionId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// Drawn at its own rectangle
    Normal,
    /// Hidden and parked in the taskbar
    Minimized,
    /// Filling the screen above the taskbar
    Maximized,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize,
}

/// An in-progress drag: the window is "selected" while one exists
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Drag {
    mode: DragMode,
    /// Cursor minus the anchored corner at press time
    offset: Point,
}

/// A user-created {name, body} record shown in a window's context menu
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DynamicOption {
    pub id: OptionId,
    pub name: String,
    pub body: String,
}

/// Common capability of every window-like entity
pub trait Window {
    fn rect(&self) -> Rect;
    fn title(&self) -> &str;
}

/// The principal interactive entity: can be dragged, resized, minimized and maximized
#[derive(Clone, Debug)]
pub struct DraggableWindow {
    id: WindowId,
    pub title: String,
    pub color: Color,
    rect: Rect,
    state: WindowState,
    drag: Option<Drag>,
    /// Snapshot restored by `restore`
    prev_rect: Rect,
    dynamic_options: Vec<DynamicOption>,
}

impl DraggableWindow {
    pub fn new(title: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: WindowId::new(),
            title: title.into(),
            color: DEFAULT_WINDOW_COLOR,
            rect,
            state: WindowState::Normal,
            drag: None,
            prev_rect: rect,
            dynamic_options: Vec::new(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn prev_rect(&self) -> Rect {
        self.prev_rect
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }

    /// True while a move- or resize-drag is in progress
    pub fn is_selected(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|d| d.mode)
    }

    pub fn title_bar(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.rect.width, TITLE_BAR_HEIGHT)
    }

    pub fn minimize_button(&self) -> Rect {
        Rect::new(
            self.rect.right() - 2 * (BUTTON_SIZE + BUTTON_MARGIN),
            self.rect.y + BUTTON_MARGIN,
            BUTTON_SIZE,
            BUTTON_SIZE,
        )
    }

    pub fn maximize_button(&self) -> Rect {
        Rect::new(
            self.rect.right() - (BUTTON_SIZE + BUTTON_MARGIN),
            self.rect.y + BUTTON_MARGIN,
            BUTTON_SIZE,
            BUTTON_SIZE,
        )
    }

    pub fn resize_handle(&self) -> Rect {
        Rect::new(
            self.rect.right() - RESIZE_HANDLE_SIZE,
            self.rect.bottom() - RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
        )
    }

    /// Drive the drag/minimize/maximize state machine with one event.
    /// A minimized window ignores everything.
    pub fn handle_event(&mut self, event: &InputEvent, screen: &ScreenGeometry) -> EventOutcome {
        if self.is_minimized() {
            return EventOutcome::NoOp;
        }

        match *event {
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos,
            } => {
                if self.minimize_button().contains(pos) {
                    self.minimize();
                    return EventOutcome::Minimized;
                }
                if self.maximize_button().contains(pos) {
                    self.toggle_maximize(screen);
                    return EventOutcome::Maximized;
                }

                if self.resize_handle().contains(pos) {
                    self.drag = Some(Drag {
                        mode: DragMode::Resize,
                        offset: Point::new(pos.x - self.rect.right(), pos.y - self.rect.bottom()),
                    });
                    EventOutcome::ClaimedFocus
                } else if self.rect.contains(pos) {
                    self.drag = Some(Drag {
                        mode: DragMode::Move,
                        offset: Point::new(pos.x - self.rect.x, pos.y - self.rect.y),
                    });
                    EventOutcome::ClaimedFocus
                } else {
                    EventOutcome::NoOp
                }
            }
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                ..
            } => {
                self.drag = None;
                EventOutcome::NoOp
            }
            InputEvent::MouseMotion { pos } => {
                let Some(drag) = self.drag else {
                    return EventOutcome::NoOp;
                };
                match drag.mode {
                    DragMode::Resize => {
                        let desired = Size::new(
                            pos.x - self.rect.x - drag.offset.x,
                            pos.y - self.rect.y - drag.offset.y,
                        );
                        // Out-of-bounds sizes are dropped for this frame
                        if let Some(resized) = try_resize(self.rect, desired, screen) {
                            self.rect = resized;
                        }
                    }
                    DragMode::Move => {
                        let desired = Point::new(pos.x - drag.offset.x, pos.y - drag.offset.y);
                        self.rect = clamp_move(self.rect, desired, screen);
                    }
                }
                EventOutcome::ClaimedFocus
            }
            _ => EventOutcome::NoOp,
        }
    }

    /// Hide the window. Geometry is untouched; a non-maximized window snapshots
    /// its rectangle so a later restore returns exactly here.
    pub fn minimize(&mut self) {
        if self.state == WindowState::Normal {
            self.prev_rect = self.rect;
        }
        self.state = WindowState::Minimized;
        self.drag = None;
    }

    /// Fill the work area, remembering the current rectangle
    pub fn maximize(&mut self, screen: &ScreenGeometry) {
        self.prev_rect = self.rect;
        self.rect = screen.work_area();
        self.state = WindowState::Maximized;
    }

    /// Back to the snapshot, clearing both minimized and maximized
    pub fn restore(&mut self) {
        self.rect = self.prev_rect;
        self.state = WindowState::Normal;
    }

    pub fn toggle_maximize(&mut self, screen: &ScreenGeometry) {
        if self.is_maximized() {
            self.restore();
        } else {
            self.maximize(screen);
        }
    }

    /// Rescale `rect` and the restore snapshot after the screen changed from `from`
    pub fn relayout(&mut self, from: Size, screen: &ScreenGeometry) {
        self.rect = relayout_rect(self.rect, from, screen);
        self.prev_rect = relayout_rect(self.prev_rect, from, screen);
    }

    pub fn dynamic_options(&self) -> &[DynamicOption] {
        &self.dynamic_options
    }

    /// Append "Option N" (N = count after insertion) with the default body
    pub fn add_dynamic_option(&mut self) -> OptionId {
        let option = DynamicOption {
            id: OptionId::new(),
            name: format!("Option {}", self.dynamic_options.len() + 1),
            body: "Editable body text.".to_string(),
        };
        let id = option.id;
        self.dynamic_options.push(option);
        id
    }

    pub fn option(&self, id: OptionId) -> Option<&DynamicOption> {
        self.dynamic_options.iter().find(|o| o.id == id)
    }

    pub fn option_mut(&mut self, id: OptionId) -> Option<&mut DynamicOption> {
        self.dynamic_options.iter_mut().find(|o| o.id == id)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.is_minimized() {
            return;
        }

        let rounded = RectStyle::FILL.rounded(CORNER_RADIUS);
        surface.fill_rect(self.rect.offset(5, 5), SHADOW_COLOR, rounded);
        surface.fill_rect(self.rect, self.color, rounded);
        surface.fill_rect(self.rect, Color::BLACK, RectStyle::outline(2).rounded(CORNER_RADIUS));

        surface.fill_rect(self.title_bar(), TITLE_BAR_COLOR, rounded);
        surface.draw_text(
            &self.title,
            Point::new(self.rect.x + 10, self.rect.y + 5),
            Color::WHITE,
            FontStyle::Regular,
        );

        let minimize = self.minimize_button();
        surface.fill_rect(minimize, Color::rgb(200, 200, 0), RectStyle::FILL);
        surface.draw_line(minimize.top_left(), minimize.top_right(), Color::BLACK, 2);

        let maximize = self.maximize_button();
        surface.fill_rect(maximize, Color::rgb(0, 200, 0), RectStyle::FILL);
        surface.fill_rect(maximize, Color::BLACK, RectStyle::outline(2));

        surface.fill_rect(self.resize_handle(), Color::rgb(250, 100, 100), RectStyle::FILL);
    }
}

impl Window for DraggableWindow {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn title(&self) -> &str {
        &self.title
    }
}
