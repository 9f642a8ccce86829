// Input events delivered to the desktop once per frame

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Mouse buttons the desktop distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// Button 1: drag, select, activate menu items
    Left,
    /// Button 2: ignored
    Middle,
    /// Button 3: open the context menu or step back through popups
    Right,
}

impl MouseButton {
    /// Conventional 1-based button number
    pub fn number(&self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        }
    }
}

/// Keys the desktop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// A printable character
    Char(char),
    Enter,
    Backspace,
    /// Anything else (arrows, function keys...)
    Other,
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
    };
}

/// One discrete event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    Quit,
    KeyDown { key: Key, modifiers: Modifiers },
    Resize { width: i32, height: i32 },
    MouseButtonDown { button: MouseButton, pos: Point },
    MouseButtonUp { button: MouseButton, pos: Point },
    MouseMotion { pos: Point },
}

impl InputEvent {
    /// Cursor position carried by mouse events
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::MouseButtonDown { pos, .. }
            | InputEvent::MouseButtonUp { pos, .. }
            | InputEvent::MouseMotion { pos } => Some(*pos),
            _ => None,
        }
    }

    /// Left button press at `pos`
    pub fn is_left_press(&self) -> Option<Point> {
        match self {
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos,
            } => Some(*pos),
            _ => None,
        }
    }

    pub fn is_left_release(&self) -> bool {
        matches!(
            self,
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                ..
            }
        )
    }

    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        InputEvent::KeyDown {
            key: Key::Char(ch),
            modifiers: Modifiers::CTRL,
        }
    }

    pub fn press(button: MouseButton, x: i32, y: i32) -> Self {
        InputEvent::MouseButtonDown {
            button,
            pos: Point::new(x, y),
        }
    }

    pub fn release(button: MouseButton, x: i32, y: i32) -> Self {
        InputEvent::MouseButtonUp {
            button,
            pos: Point::new(x, y),
        }
    }

    pub fn motion(x: i32, y: i32) -> Self {
        InputEvent::MouseMotion {
            pos: Point::new(x, y),
        }
    }
}
