use tracing::{debug, info};

use super::{live_target, EventOutcome, PopupContext};
use crate::geometry::layout::{wrap_text, LINE_SPACING, WRAP_COLUMNS};
use crate::geometry::{Color, Point, Rect};
use crate::input_handler::{InputEvent, Key};
use crate::state::window::{DynamicOption, OptionId, Window, WindowId, TITLE_BAR_HEIGHT};
use crate::state::WindowManager;
use crate::surface::{FontStyle, RectStyle, Surface};

const POPUP_WIDTH: i32 = 300;
const POPUP_HEIGHT: i32 = 200;
const BACKGROUND: Color = Color::rgb(220, 220, 220);
const TITLE_BAR_COLOR: Color = Color::rgb(100, 100, 250);
/// Frames between caret visibility flips
const CARET_BLINK_FRAMES: u32 = 60;

/// Which field, if any, the edit buffer is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Idle,
    Title,
    Body,
}

/// Editor for one dynamic option record of a window. Commits write straight
/// into the record owned by the target window.
#[derive(Debug, Clone, PartialEq)]
pub struct EditablePopupWindow {
    rect: Rect,
    target: WindowId,
    option: OptionId,
    title: String,
    body: String,
    mode: EditMode,
    buffer: String,
    caret_counter: u32,
    caret_visible: bool,
}

impl EditablePopupWindow {
    pub fn new(origin: Point, target: WindowId, option: &DynamicOption) -> Self {
        Self {
            rect: Rect::new(origin.x, origin.y, POPUP_WIDTH, POPUP_HEIGHT),
            target,
            option: option.id,
            title: option.name.clone(),
            body: option.body.clone(),
            mode: EditMode::Idle,
            buffer: String::new(),
            caret_counter: 0,
            caret_visible: true,
        }
    }

    pub fn target(&self) -> WindowId {
        self.target
    }

    pub fn option(&self) -> OptionId {
        self.option
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    fn title_bar(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.rect.width, TITLE_BAR_HEIGHT)
    }

    fn body_area(&self) -> Rect {
        Rect::new(
            self.rect.x,
            self.rect.y + TITLE_BAR_HEIGHT,
            self.rect.width,
            self.rect.height - TITLE_BAR_HEIGHT,
        )
    }

    fn enter_mode(&mut self, mode: EditMode) {
        self.buffer = match mode {
            EditMode::Title => self.title.clone(),
            EditMode::Body => self.body.clone(),
            EditMode::Idle => String::new(),
        };
        self.mode = mode;
        self.caret_counter = 0;
        self.caret_visible = true;
    }

    fn record<'w>(&self, windows: &'w mut WindowManager) -> Option<&'w mut DynamicOption> {
        windows.get_mut(self.target)?.option_mut(self.option)
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut PopupContext<'_>) -> EventOutcome {
        match *event {
            InputEvent::MouseButtonDown { .. } => {
                let Some(pos) = event.is_left_press() else {
                    return EventOutcome::NoOp;
                };
                if self.title_bar().contains(pos) {
                    self.enter_mode(EditMode::Title);
                    EventOutcome::ClaimedFocus
                } else if self.body_area().contains(pos) {
                    self.enter_mode(EditMode::Body);
                    EventOutcome::ClaimedFocus
                } else {
                    // Leaving without Enter drops the buffer
                    self.enter_mode(EditMode::Idle);
                    EventOutcome::NoOp
                }
            }
            InputEvent::KeyDown { key, modifiers } if self.mode != EditMode::Idle => match key {
                Key::Enter if modifiers.shift => {
                    if self.mode != EditMode::Body {
                        return EventOutcome::NoOp;
                    }
                    let Some(record) = self.record(ctx.windows) else {
                        return EventOutcome::Closed;
                    };
                    record.body.push('\n');
                    self.body.push('\n');
                    self.buffer.push('\n');
                    EventOutcome::ClaimedFocus
                }
                Key::Enter => self.commit(ctx.windows),
                Key::Backspace => {
                    self.buffer.pop();
                    EventOutcome::ClaimedFocus
                }
                Key::Char(ch) => {
                    self.buffer.push(ch);
                    EventOutcome::ClaimedFocus
                }
                Key::Other => EventOutcome::NoOp,
            },
            _ => EventOutcome::NoOp,
        }
    }

    /// Write the buffer into the bound field and the backing record, then go idle
    fn commit(&mut self, windows: &mut WindowManager) -> EventOutcome {
        let mode = self.mode;
        let text = std::mem::take(&mut self.buffer);
        let Some(record) = self.record(windows) else {
            return EventOutcome::Closed;
        };
        match mode {
            EditMode::Title => record.name = text.clone(),
            EditMode::Body => record.body = text.clone(),
            EditMode::Idle => return EventOutcome::NoOp,
        }
        match mode {
            EditMode::Title => {
                info!("[EditablePopup] renamed option to '{}'", text);
                self.title = text;
            }
            _ => {
                debug!("[EditablePopup] body of '{}' updated ({} chars)", self.title, text.len());
                self.body = text;
            }
        }
        self.enter_mode(EditMode::Idle);
        EventOutcome::ClaimedFocus
    }

    /// Advance the caret blink once per frame while editing
    pub fn tick(&mut self) {
        if self.mode == EditMode::Idle {
            return;
        }
        self.caret_counter += 1;
        if self.caret_counter >= CARET_BLINK_FRAMES {
            self.caret_visible = !self.caret_visible;
            self.caret_counter = 0;
        }
    }

    /// Pick up edits made elsewhere to the record. False once the target
    /// window or the record itself is gone.
    pub fn refresh(&mut self, windows: &WindowManager) -> bool {
        if !live_target(windows, self.target) {
            return false;
        }
        let Some(record) = windows.get(self.target).and_then(|w| w.option(self.option)) else {
            return false;
        };
        self.title.clone_from(&record.name);
        self.body.clone_from(&record.body);
        true
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let rounded = RectStyle::FILL.rounded(5);
        surface.fill_rect(self.rect, BACKGROUND, rounded);
        surface.fill_rect(self.rect, Color::BLACK, RectStyle::outline(2).rounded(5));
        surface.fill_rect(self.title_bar(), TITLE_BAR_COLOR, rounded);

        let title = match self.mode {
            EditMode::Title => self.buffer.as_str(),
            _ => self.title.as_str(),
        };
        let title_at = Point::new(self.rect.x + 10, self.rect.y + 5);
        let title_size = surface.draw_text(title, title_at, Color::WHITE, FontStyle::Regular);

        let body = match self.mode {
            EditMode::Body => self.buffer.as_str(),
            _ => self.body.as_str(),
        };
        let line_step = surface.line_height(FontStyle::Regular) + LINE_SPACING;
        let lines = wrap_text(body, WRAP_COLUMNS);
        let mut y = self.rect.y + 40;
        let mut last_line = Point::new(self.rect.x + 10, y);
        let mut last_width = 0;
        for line in &lines {
            let at = Point::new(self.rect.x + 10, y);
            last_width = surface.draw_text(line, at, Color::BLACK, FontStyle::Regular).width;
            last_line = at;
            y += line_step;
        }

        if !self.caret_visible {
            return;
        }
        let line_height = surface.line_height(FontStyle::Regular);
        match self.mode {
            EditMode::Title => {
                let x = title_at.x + title_size.width + 2;
                surface.draw_line(
                    Point::new(x, title_at.y),
                    Point::new(x, title_at.y + line_height),
                    Color::WHITE,
                    1,
                );
            }
            EditMode::Body => {
                let x = last_line.x + last_width + 2;
                surface.draw_line(
                    Point::new(x, last_line.y),
                    Point::new(x, last_line.y + line_height),
                    Color::BLACK,
                    1,
                );
            }
            EditMode::Idle => {}
        }
    }
}

impl Window for EditablePopupWindow {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn title(&self) -> &str {
        &self.title
    }
}
