use tracing::debug;

use super::{EventOutcome, PopupContext};
use crate::geometry::layout::popup_size;
use crate::geometry::{Color, Point, Rect};
use crate::input_handler::{InputEvent, MouseButton};
use crate::state::window::{DraggableWindow, Window, WindowId};
use crate::surface::{FontStyle, RectStyle, Surface, TextMetrics};

const TEXT_LINES: [&str; 2] = ["RGB Properties", "Adjust the color sliders below."];
const CHANNEL_LABELS: [&str; 3] = ["R", "G", "B"];
const PADDING: i32 = 20;
const MIN_WIDTH: i32 = 200;
const SLIDER_AREA_HEIGHT: i32 = 80;
const SLIDER_WIDTH: i32 = 150;
const SLIDER_HEIGHT: i32 = 20;
const BACKGROUND: Color = Color::rgb(200, 200, 200);
const TRACK_COLOR: Color = Color::rgb(180, 180, 180);

/// Three live color sliders bound to a window. Every drag step writes the
/// window's color immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbPropertiesWindow {
    rect: Rect,
    target: WindowId,
    channels: [u8; 3],
    dragging: [bool; 3],
}

impl RgbPropertiesWindow {
    pub fn new(origin: Point, target: &DraggableWindow, metrics: &dyn TextMetrics) -> Self {
        let text = popup_size(&TEXT_LINES, metrics, FontStyle::Regular, PADDING);
        let color = target.color;
        Self {
            rect: Rect::new(
                origin.x,
                origin.y,
                text.width.max(MIN_WIDTH),
                text.height + SLIDER_AREA_HEIGHT,
            ),
            target: target.id(),
            channels: [color.r, color.g, color.b],
            dragging: [false; 3],
        }
    }

    pub fn target(&self) -> WindowId {
        self.target
    }

    pub fn color(&self) -> Color {
        Color::rgb(self.channels[0], self.channels[1], self.channels[2])
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.iter().any(|d| *d)
    }

    pub fn slider_rect(&self, channel: usize) -> Rect {
        Rect::new(
            self.rect.x + 20,
            self.rect.y + 60 + channel as i32 * 30,
            SLIDER_WIDTH,
            SLIDER_HEIGHT,
        )
    }

    fn slider_value(slider: Rect, x: i32) -> u8 {
        let dx = (x - slider.x).clamp(0, slider.width);
        (dx * 255 / slider.width) as u8
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut PopupContext<'_>) -> EventOutcome {
        match *event {
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos,
            } => {
                let mut armed = false;
                for channel in 0..CHANNEL_LABELS.len() {
                    if self.slider_rect(channel).contains(pos) {
                        self.dragging[channel] = true;
                        armed = true;
                    }
                }
                if armed {
                    EventOutcome::ClaimedFocus
                } else {
                    EventOutcome::NoOp
                }
            }
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = [false; 3];
                EventOutcome::NoOp
            }
            InputEvent::MouseMotion { pos } if self.is_dragging() => {
                for channel in 0..CHANNEL_LABELS.len() {
                    if self.dragging[channel] {
                        self.channels[channel] = Self::slider_value(self.slider_rect(channel), pos.x);
                    }
                }
                let color = self.color();
                let Some(target) = ctx.windows.get_mut(self.target) else {
                    return EventOutcome::Closed;
                };
                target.color = color;
                debug!("[RGBProperties] '{}' color -> {:?}", target.title, color);
                EventOutcome::ClaimedFocus
            }
            _ => EventOutcome::NoOp,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, BACKGROUND, RectStyle::FILL);
        surface.fill_rect(self.rect, Color::BLACK, RectStyle::outline(2));

        for (index, line) in TEXT_LINES.iter().enumerate() {
            let at = Point::new(self.rect.x + 10, self.rect.y + 10 + index as i32 * 30);
            surface.draw_text(line, at, Color::BLACK, FontStyle::Regular);
        }

        for (channel, label) in CHANNEL_LABELS.iter().enumerate() {
            let slider = self.slider_rect(channel);
            let value = i32::from(self.channels[channel]);
            surface.fill_rect(slider, TRACK_COLOR, RectStyle::FILL);
            surface.fill_rect(slider, Color::BLACK, RectStyle::outline(1));
            let filled = Rect::new(slider.x, slider.y, value * slider.width / 255, slider.height);
            surface.fill_rect(filled, Color::BLACK, RectStyle::FILL);
            surface.draw_text(
                &format!("{}: {}", label, value),
                Point::new(slider.right() + 10, slider.y),
                Color::BLACK,
                FontStyle::Regular,
            );
        }
    }
}

impl Window for RgbPropertiesWindow {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn title(&self) -> &str {
        TEXT_LINES[0]
    }
}
