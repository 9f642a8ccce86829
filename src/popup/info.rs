// Read-only text popups

use crate::geometry::layout::{popup_size, LINE_SPACING};
use crate::geometry::{Color, Point, Rect};
use crate::state::window::Window;
use crate::surface::{FontStyle, RectStyle, Surface, TextMetrics};

const PADDING: i32 = 20;
const BACKGROUND: Color = Color::rgb(200, 200, 200);

pub const HELP_LINES: [&str; 15] = [
    "Help Menu:",
    "1. Right-click on a window to open the context menu.",
    "2. Use the 'RGB' option to adjust the window's color dynamically.",
    "3. Use 'New Option' to create dynamic menu items.",
    "4. Use the taskbar to restore minimized windows.",
    "5. Drag a window by clicking and holding the title bar.",
    "6. Resize a window using the handle at the bottom-right corner.",
    "7. Use the 'Help' option to open this help menu.",
    "8. Keyboard Shortcuts:",
    "   - Ctrl+N: Open a new window.",
    "   - Ctrl+W: Minimize the selected window.",
    "   - Ctrl+F: Toggle fullscreen mode.",
    "9. Taskbar interaction: Minimized windows appear in the taskbar.",
    "   Click their buttons to restore them.",
    "10. Use the main menu for window-specific actions.",
];

/// Panel sized to fit its lines, which are drawn one per row inside the padding
#[derive(Debug, Clone, PartialEq)]
struct TextPanel {
    rect: Rect,
    lines: Vec<String>,
}

impl TextPanel {
    fn new(origin: Point, lines: Vec<String>, metrics: &dyn TextMetrics) -> Self {
        let size = popup_size(&lines, metrics, FontStyle::Regular, PADDING);
        Self {
            rect: Rect::new(origin.x, origin.y, size.width, size.height),
            lines,
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, BACKGROUND, RectStyle::FILL);
        surface.fill_rect(self.rect, Color::BLACK, RectStyle::outline(2));

        let step = surface.line_height(FontStyle::Regular) + LINE_SPACING;
        let mut y = self.rect.y + PADDING;
        for line in &self.lines {
            surface.draw_text(line, Point::new(self.rect.x + PADDING, y), Color::BLACK, FontStyle::Regular);
            y += step;
        }
    }
}

/// Usage and shortcut reference
#[derive(Debug, Clone, PartialEq)]
pub struct HelpWindow {
    panel: TextPanel,
}

impl HelpWindow {
    pub fn new(origin: Point, metrics: &dyn TextMetrics) -> Self {
        let lines = HELP_LINES.iter().map(|l| l.to_string()).collect();
        Self {
            panel: TextPanel::new(origin, lines, metrics),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.panel.draw(surface);
    }
}

impl Window for HelpWindow {
    fn rect(&self) -> Rect {
        self.panel.rect
    }

    fn title(&self) -> &str {
        "Help"
    }
}

/// Placeholder panel for a named submenu
#[derive(Debug, Clone, PartialEq)]
pub struct SubmenuWindow {
    title: String,
    panel: TextPanel,
}

impl SubmenuWindow {
    pub fn new(origin: Point, title: &str, metrics: &dyn TextMetrics) -> Self {
        let lines = vec![
            format!("Submenu: {}", title),
            "Placeholder text for the submenu.".to_string(),
            "More information can be added here.".to_string(),
        ];
        Self {
            title: title.to_string(),
            panel: TextPanel::new(origin, lines, metrics),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.panel.draw(surface);
    }
}

impl Window for SubmenuWindow {
    fn rect(&self) -> Rect {
        self.panel.rect
    }

    fn title(&self) -> &str {
        &self.title
    }
}
