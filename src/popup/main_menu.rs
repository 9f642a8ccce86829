// Paginated context menu: three fixed entries plus one page of the
// target window's dynamic options

use tracing::info;

use super::editable::EditablePopupWindow;
use super::info::HelpWindow;
use super::rgb::RgbPropertiesWindow;
use super::{live_target, DrawContext, EventOutcome, Popup, PopupContext};
use crate::geometry::{Color, Point, Rect};
use crate::input_handler::InputEvent;
use crate::state::window::{DraggableWindow, OptionId, Window, WindowId};
use crate::state::WindowManager;
use crate::surface::{FontStyle, RectStyle, Surface};

/// Dynamic options shown per page
pub const OPTIONS_PER_PAGE: usize = 5;
const MENU_WIDTH: i32 = 200;
const ROW_HEIGHT: i32 = 30;
const MENU_COLOR: Color = Color::rgb(200, 200, 200);
const HOVER_COLOR: Color = Color::rgb(150, 150, 150);
const NAV_COLOR: Color = Color::rgb(180, 180, 180);

/// Entries present on every page, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticOption {
    Rgb,
    Help,
    NewOption,
}

impl StaticOption {
    pub const ALL: [StaticOption; 3] = [StaticOption::Rgb, StaticOption::Help, StaticOption::NewOption];

    pub fn label(&self) -> &'static str {
        match self {
            StaticOption::Rgb => "RGB",
            StaticOption::Help => "Help",
            StaticOption::NewOption => "New Option",
        }
    }
}

/// One visible row of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Static(StaticOption),
    Dynamic { id: OptionId, name: String },
}

impl MenuEntry {
    pub fn label(&self) -> &str {
        match self {
            MenuEntry::Static(option) => option.label(),
            MenuEntry::Dynamic { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainMenuWindow {
    origin: Point,
    target: WindowId,
    current_page: usize,
    /// Mirror of the target's option count; drives the menu height
    dynamic_count: usize,
}

impl MainMenuWindow {
    /// Menu for `target` with its top-left corner at `origin`
    pub fn new(origin: Point, target: &DraggableWindow) -> Self {
        Self {
            origin,
            target: target.id(),
            current_page: 0,
            dynamic_count: target.dynamic_options().len(),
        }
    }

    pub fn target(&self) -> WindowId {
        self.target
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_multiple_pages(&self) -> bool {
        self.dynamic_count > OPTIONS_PER_PAGE
    }

    pub fn total_pages(&self) -> usize {
        self.dynamic_count.div_ceil(OPTIONS_PER_PAGE)
    }

    fn dynamic_on_page(&self) -> usize {
        self.dynamic_count
            .saturating_sub(self.current_page * OPTIONS_PER_PAGE)
            .min(OPTIONS_PER_PAGE)
    }

    /// Static entries followed by the current page of dynamic options
    pub fn visible_entries(&self, target: &DraggableWindow) -> Vec<MenuEntry> {
        let start = self.current_page * OPTIONS_PER_PAGE;
        let dynamic = target
            .dynamic_options()
            .iter()
            .skip(start)
            .take(OPTIONS_PER_PAGE)
            .map(|o| MenuEntry::Dynamic {
                id: o.id,
                name: o.name.clone(),
            });
        StaticOption::ALL
            .iter()
            .map(|s| MenuEntry::Static(*s))
            .chain(dynamic)
            .collect()
    }

    /// Height grows with the visible rows; with more than one page it is
    /// fixed at a full page plus room for the navigation buttons.
    fn height(&self) -> i32 {
        if self.has_multiple_pages() {
            (StaticOption::ALL.len() + OPTIONS_PER_PAGE) as i32 * ROW_HEIGHT + 50
        } else {
            (StaticOption::ALL.len() + self.dynamic_on_page()) as i32 * ROW_HEIGHT + 10
        }
    }

    pub fn option_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.origin.x + 10,
            self.origin.y + 10 + index as i32 * ROW_HEIGHT,
            MENU_WIDTH - 20,
            25,
        )
    }

    pub fn prev_button(&self) -> Rect {
        let rect = self.rect();
        Rect::new(rect.x + 10, rect.bottom() - 40, 60, 30)
    }

    pub fn next_button(&self) -> Rect {
        let rect = self.rect();
        Rect::new(rect.right() - 70, rect.bottom() - 40, 60, 30)
    }

    /// Append "Option N" to the target and jump to the page holding it
    pub fn create_new_option(&mut self, target: &mut DraggableWindow) -> OptionId {
        let id = target.add_dynamic_option();
        self.dynamic_count = target.dynamic_options().len();
        self.current_page = self.total_pages().saturating_sub(1);
        info!(
            "[MainMenu] '{}' now has {} option(s), page {}/{}",
            target.title,
            self.dynamic_count,
            self.current_page + 1,
            self.total_pages()
        );
        id
    }

    pub fn refresh(&mut self, windows: &WindowManager) -> bool {
        if !live_target(windows, self.target) {
            return false;
        }
        if let Some(target) = windows.get(self.target) {
            self.dynamic_count = target.dynamic_options().len();
            let pages = self.total_pages().max(1);
            self.current_page = self.current_page.min(pages - 1);
        }
        true
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut PopupContext<'_>) -> EventOutcome {
        let Some(pos) = event.is_left_press() else {
            return EventOutcome::NoOp;
        };
        let Some(target) = ctx.windows.get_mut(self.target) else {
            return EventOutcome::Closed;
        };
        self.dynamic_count = target.dynamic_options().len();

        let entries = self.visible_entries(target);
        let hit = entries
            .into_iter()
            .enumerate()
            .find(|(index, _)| self.option_rect(*index).contains(pos))
            .map(|(_, entry)| entry);

        if let Some(entry) = hit {
            return match entry {
                MenuEntry::Static(StaticOption::Rgb) => EventOutcome::Spawn(Popup::Rgb(
                    RgbPropertiesWindow::new(pos, target, ctx.metrics),
                )),
                MenuEntry::Static(StaticOption::Help) => {
                    EventOutcome::Spawn(Popup::Help(HelpWindow::new(pos, ctx.metrics)))
                }
                MenuEntry::Static(StaticOption::NewOption) => {
                    self.create_new_option(target);
                    EventOutcome::NoOp
                }
                MenuEntry::Dynamic { id, .. } => match target.option(id) {
                    Some(option) => EventOutcome::Spawn(Popup::Editable(EditablePopupWindow::new(
                        pos,
                        self.target,
                        option,
                    ))),
                    None => EventOutcome::NoOp,
                },
            };
        }

        if self.has_multiple_pages() {
            let pages = self.total_pages();
            if self.prev_button().contains(pos) {
                self.current_page = (self.current_page + pages - 1) % pages;
            } else if self.next_button().contains(pos) {
                self.current_page = (self.current_page + 1) % pages;
            }
        }
        EventOutcome::NoOp
    }

    fn draw_navigation_button(&self, surface: &mut dyn Surface, label: &str, rect: Rect, ctx: &DrawContext<'_>) {
        let fill = if ctx.is_hovered(rect) { HOVER_COLOR } else { NAV_COLOR };
        surface.fill_rect(rect, fill, RectStyle::FILL);
        surface.fill_rect(rect, Color::BLACK, RectStyle::outline(2));
        let text = surface.render_text(label, Color::BLACK, FontStyle::Regular);
        let at = Point::new(
            rect.x + (rect.width - text.size.width) / 2,
            rect.y + (rect.height - text.size.height) / 2,
        );
        surface.blit(&text, at);
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext<'_>) {
        let Some(target) = ctx.windows.get(self.target) else {
            return;
        };
        let rect = self.rect();
        surface.fill_rect(rect, MENU_COLOR, RectStyle::FILL);
        surface.fill_rect(rect, Color::BLACK, RectStyle::outline(2));

        for (index, entry) in self.visible_entries(target).iter().enumerate() {
            let row = self.option_rect(index);
            if ctx.is_hovered(row) {
                surface.fill_rect(row, HOVER_COLOR, RectStyle::FILL);
            }
            let style = match entry {
                MenuEntry::Static(_) => FontStyle::Bold,
                MenuEntry::Dynamic { .. } => FontStyle::Regular,
            };
            surface.draw_text(entry.label(), Point::new(row.x + 5, row.y + 2), Color::BLACK, style);
        }

        if self.has_multiple_pages() {
            self.draw_navigation_button(surface, "<-", self.prev_button(), ctx);
            self.draw_navigation_button(surface, "->", self.next_button(), ctx);
        }
    }
}

impl Window for MainMenuWindow {
    fn rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, MENU_WIDTH, self.height())
    }

    fn title(&self) -> &str {
        "Menu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_handler::MouseButton;
    use crate::surface::MonospaceMetrics;

    fn setup() -> (WindowManager, WindowId) {
        let mut windows = WindowManager::new();
        let id = windows.spawn_window("Target", Rect::new(100, 100, 300, 200));
        (windows, id)
    }

    fn click(menu: &mut MainMenuWindow, windows: &mut WindowManager, at: Point) -> EventOutcome {
        let metrics = MonospaceMetrics::default();
        let mut ctx = PopupContext {
            windows,
            metrics: &metrics,
        };
        menu.handle_event(&InputEvent::press(MouseButton::Left, at.x, at.y), &mut ctx)
    }

    fn new_menu(windows: &WindowManager, id: WindowId) -> MainMenuWindow {
        MainMenuWindow::new(Point::new(50, 50), windows.get(id).unwrap())
    }

    #[test]
    fn test_static_entries_always_first() {
        let (windows, id) = setup();
        let menu = new_menu(&windows, id);
        let target = windows.get(id).unwrap();
        let labels: Vec<_> = menu
            .visible_entries(target)
            .iter()
            .map(|e| e.label().to_string())
            .collect();
        assert_eq!(labels, vec!["RGB", "Help", "New Option"]);
        assert_eq!(menu.rect(), Rect::new(50, 50, 200, 100));
    }

    #[test]
    fn test_new_option_six_times_paginates() {
        let (mut windows, id) = setup();
        let mut menu = new_menu(&windows, id);
        for _ in 0..6 {
            let row = menu.option_rect(2).center();
            assert_eq!(click(&mut menu, &mut windows, row), EventOutcome::NoOp);
        }
        assert_eq!(windows.get(id).map(|w| w.dynamic_options().len()), Some(6));
        assert!(menu.has_multiple_pages());
        assert_eq!(menu.total_pages(), 2);
        assert_eq!(menu.current_page(), 1);
        assert_eq!(menu.rect().height, 290);

        let target = windows.get(id).unwrap();
        let labels: Vec<_> = menu
            .visible_entries(target)
            .iter()
            .map(|e| e.label().to_string())
            .collect();
        assert_eq!(labels, vec!["RGB", "Help", "New Option", "Option 6"]);
    }

    #[test]
    fn test_page_navigation_wraps_both_ways() {
        let (mut windows, id) = setup();
        let w = windows.get_mut(id).unwrap();
        for _ in 0..11 {
            w.add_dynamic_option();
        }
        let mut menu = new_menu(&windows, id);
        assert_eq!(menu.total_pages(), 3);

        let prev = menu.prev_button().center();
        click(&mut menu, &mut windows, prev);
        assert_eq!(menu.current_page(), 2);

        let next = menu.next_button().center();
        click(&mut menu, &mut windows, next);
        assert_eq!(menu.current_page(), 0);
        click(&mut menu, &mut windows, next);
        assert_eq!(menu.current_page(), 1);
    }

    #[test]
    fn test_entries_spawn_popups() {
        let (mut windows, id) = setup();
        let mut menu = new_menu(&windows, id);

        let rgb = menu.option_rect(0).center();
        assert!(matches!(click(&mut menu, &mut windows, rgb), EventOutcome::Spawn(Popup::Rgb(_))));

        let help = menu.option_rect(1).center();
        assert!(matches!(click(&mut menu, &mut windows, help), EventOutcome::Spawn(Popup::Help(_))));

        let new_option = menu.option_rect(2).center();
        click(&mut menu, &mut windows, new_option);
        let dynamic = menu.option_rect(3).center();
        match click(&mut menu, &mut windows, dynamic) {
            EventOutcome::Spawn(Popup::Editable(popup)) => assert_eq!(popup.title(), "Option 1"),
            other => panic!("expected editable popup, got {:?}", other),
        }

        // Padding between rows hits nothing
        let gap = Point::new(menu.option_rect(0).x + 5, menu.option_rect(0).bottom() + 2);
        assert_eq!(click(&mut menu, &mut windows, gap), EventOutcome::NoOp);
    }

    #[test]
    fn test_missing_target_closes_menu() {
        let (mut windows, id) = setup();
        let mut menu = new_menu(&windows, id);
        windows.remove(id);
        let row = menu.option_rect(0).center();
        assert_eq!(click(&mut menu, &mut windows, row), EventOutcome::Closed);
        assert!(!menu.refresh(&windows));
    }
}
