// Composition root: owns the window stack, taskbar and menu stack and routes
// every input event between them

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DesktopConfig;
use crate::geometry::layout::constrain_to_screen;
use crate::geometry::{Color, Point, Rect, ScreenGeometry, Size};
use crate::input_handler::{InputEvent, Key, MouseButton};
use crate::popup::{DrawContext, EventOutcome, MainMenuWindow, MenuStack, Popup, PopupContext};
use crate::state::taskbar::Taskbar;
use crate::state::window::{Window, WindowId, WindowState};
use crate::state::WindowManager;
use crate::surface::{MonospaceMetrics, RectStyle, Surface};

const BACKGROUND: Color = Color::rgb(30, 30, 30);
const SPAWN_WIDTH: i32 = 300;
const SPAWN_HEIGHT: i32 = 200;
const SPAWN_MARGIN: i32 = 50;

/// One window as reported by [`Application::snapshot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSnapshot {
    pub title: String,
    pub rect: Rect,
    pub state: WindowState,
    pub color: Color,
    pub options: usize,
}

/// Serializable view of the whole desktop, bottom-to-top
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopSnapshot {
    pub screen: Size,
    pub fullscreen: bool,
    pub windows: Vec<WindowSnapshot>,
    pub taskbar: Vec<String>,
    pub menus: Vec<String>,
    pub selected: Option<String>,
}

pub struct Application {
    screen: ScreenGeometry,
    windowed_size: Size,
    display_size: Size,
    fullscreen: bool,
    windows: WindowManager,
    taskbar: Taskbar,
    menus: MenuStack,
    selected: Option<WindowId>,
    /// Last mouse position seen, for hover highlights
    cursor: Option<Point>,
    running: bool,
    metrics: MonospaceMetrics,
    /// Seeded so a given config always places windows the same way
    rng: StdRng,
}

impl Application {
    /// Desktop with a single "Main Window". `display` is the size fullscreen
    /// mode switches to.
    pub fn new(config: &DesktopConfig, display: Size) -> Self {
        let windowed_size = config.windowed_size();
        let fullscreen = config.start_fullscreen;
        let size = Self::screen_size_for(fullscreen, windowed_size, display);
        let screen = ScreenGeometry::new(size, config.taskbar_height);

        let mut windows = WindowManager::new();
        windows.spawn_window("Main Window", Rect::new(100, 100, 300, 200));
        info!("[Application] desktop {}x{} (fullscreen: {})", size.width, size.height, fullscreen);

        Self {
            screen,
            windowed_size,
            display_size: display,
            fullscreen,
            windows,
            taskbar: Taskbar::new(&screen),
            menus: MenuStack::new(),
            selected: None,
            cursor: None,
            running: true,
            metrics: config.metrics(),
            rng: StdRng::seed_from_u64(config.spawn_seed),
        }
    }

    fn screen_size_for(fullscreen: bool, windowed: Size, display: Size) -> Size {
        if display.is_empty() {
            windowed
        } else if fullscreen {
            display
        } else {
            windowed.min(display)
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn screen(&self) -> &ScreenGeometry {
        &self.screen
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager {
        &mut self.windows
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn menus(&self) -> &MenuStack {
        &self.menus
    }

    pub fn selected(&self) -> Option<WindowId> {
        self.selected
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.menus.prune(&self.windows);
        if let Some(pos) = event.position() {
            self.cursor = Some(pos);
        }

        match *event {
            InputEvent::Quit => {
                info!("[Application] quit requested");
                self.running = false;
            }
            InputEvent::KeyDown { key, modifiers } if modifiers.ctrl => self.handle_shortcut(key),
            InputEvent::Resize { width, height } => {
                if width <= 0 || height <= 0 {
                    warn!("[Application] ignoring resize to {}x{}", width, height);
                    return;
                }
                self.resize_screen(Size::new(width, height));
                self.route_to_popup_then_windows(event);
            }
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos,
            } => self.handle_left_press(event, pos),
            InputEvent::MouseButtonDown {
                button: MouseButton::Right,
                pos,
            } => self.handle_right_press(pos),
            InputEvent::MouseButtonDown {
                button: MouseButton::Middle,
                ..
            } => {}
            _ => self.route_to_popup_then_windows(event),
        }
    }

    fn handle_left_press(&mut self, event: &InputEvent, pos: Point) {
        if self.taskbar.rect().contains(pos) {
            if let Some(id) = self.taskbar.handle_event(event, &mut self.windows) {
                debug!("[Application] taskbar restored {}", id);
            }
            return;
        }

        if !self.menus.is_empty() {
            let inside = self.menus.top().is_some_and(|p| p.rect().contains(pos));
            if inside {
                self.dispatch_to_top_popup(event);
            } else {
                self.menus.clear();
            }
            return;
        }

        self.dispatch_to_windows(event);
    }

    fn handle_right_press(&mut self, pos: Point) {
        if !self.menus.is_empty() {
            self.menus.pop();
            return;
        }
        let Some(id) = self.windows.topmost_at(pos) else {
            return;
        };
        if let Some(target) = self.windows.get(id) {
            self.menus.push(Popup::MainMenu(MainMenuWindow::new(pos, target)));
        }
    }

    fn route_to_popup_then_windows(&mut self, event: &InputEvent) {
        self.dispatch_to_top_popup(event);
        self.dispatch_to_windows(event);
    }

    fn dispatch_to_top_popup(&mut self, event: &InputEvent) {
        let Some(top) = self.menus.top_mut() else {
            return;
        };
        let mut ctx = PopupContext {
            windows: &mut self.windows,
            metrics: &self.metrics,
        };
        let outcome = top.handle_event(event, &mut ctx);
        match outcome {
            EventOutcome::Spawn(popup) => self.menus.push(popup),
            EventOutcome::Closed => {
                self.menus.pop();
            }
            _ => {}
        }
    }

    fn dispatch_to_windows(&mut self, event: &InputEvent) {
        let report = self.windows.dispatch(event, &self.screen);
        if let Some(id) = report.selected {
            self.selected = Some(id);
        }
        if let Some(id) = report.minimized {
            self.taskbar.add(id);
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
    }

    fn handle_shortcut(&mut self, key: Key) {
        match key {
            Key::Char(ch) => match ch.to_ascii_lowercase() {
                'n' => {
                    self.spawn_window();
                }
                'w' => self.minimize_selected(),
                'f' => self.toggle_fullscreen(),
                other => debug!("[Application] no shortcut for Ctrl+{}", other),
            },
            _ => debug!("[Application] no shortcut for Ctrl+{:?}", key),
        }
    }

    /// New 300x200 window at a random spot inside the margins
    pub fn spawn_window(&mut self) -> WindowId {
        let title = format!("Window {}", self.windows.len() + 1);
        let x = self.spawn_coordinate(self.screen.size.width - SPAWN_WIDTH - SPAWN_MARGIN);
        let y = self.spawn_coordinate(self.screen.desktop_height() - SPAWN_HEIGHT - SPAWN_MARGIN);
        let rect = constrain_to_screen(Rect::new(x, y, SPAWN_WIDTH, SPAWN_HEIGHT), &self.screen);
        self.windows.spawn_window(title, rect)
    }

    /// Uniform in `SPAWN_MARGIN..=hi`; an empty range collapses to the margin
    fn spawn_coordinate(&mut self, hi: i32) -> i32 {
        if hi <= SPAWN_MARGIN {
            return SPAWN_MARGIN;
        }
        self.rng.gen_range(SPAWN_MARGIN..=hi)
    }

    /// Minimize the selected window into the taskbar and clear the selection
    pub fn minimize_selected(&mut self) {
        let Some(id) = self.selected.take() else {
            debug!("[Application] Ctrl+W with no selection");
            return;
        };
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if !window.is_minimized() {
            window.minimize();
            info!("[Application] minimized '{}'", window.title);
            self.taskbar.add(id);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        let size = Self::screen_size_for(self.fullscreen, self.windowed_size, self.display_size);
        info!(
            "[Application] fullscreen {} -> {}x{}",
            if self.fullscreen { "on" } else { "off" },
            size.width,
            size.height
        );
        self.apply_screen_size(size);
    }

    /// The host window itself was resized. In fullscreen the new size is the
    /// display; the configured windowed size is kept for leaving fullscreen.
    pub fn resize_screen(&mut self, size: Size) {
        if self.fullscreen {
            self.display_size = size;
        }
        self.apply_screen_size(size);
    }

    /// The display (fullscreen size) changed
    pub fn set_display_size(&mut self, size: Size) {
        if size.is_empty() || size == self.display_size {
            return;
        }
        self.display_size = size;
        let target = Self::screen_size_for(self.fullscreen, self.windowed_size, size);
        self.apply_screen_size(target);
    }

    /// Rescale every window and re-pin the taskbar for a new screen size
    fn apply_screen_size(&mut self, size: Size) {
        if size == self.screen.size || size.is_empty() {
            return;
        }
        let from = self.screen.size;
        self.screen = ScreenGeometry::new(size, self.screen.taskbar_height);
        self.windows.relayout(from, &self.screen);
        self.taskbar.relayout(&self.screen);
        info!(
            "[Application] re-layout {}x{} -> {}x{}",
            from.width, from.height, size.width, size.height
        );
    }

    /// Once per frame, after events
    pub fn update(&mut self) {
        self.menus.prune(&self.windows);
        self.menus.tick();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let full = Rect::new(0, 0, self.screen.size.width, self.screen.size.height);
        surface.fill_rect(full, BACKGROUND, RectStyle::FILL);
        self.windows.draw(surface);
        let ctx = DrawContext {
            windows: &self.windows,
            cursor: self.cursor,
        };
        self.menus.draw(surface, &ctx);
        self.taskbar.draw(surface, &self.windows);
    }

    /// Dispatch a batch of events, then update and draw
    pub fn frame<I>(&mut self, events: I, surface: &mut dyn Surface)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle_event(&event);
            if !self.running {
                return;
            }
        }
        self.update();
        self.draw(surface);
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        let title_of = |id: &WindowId| self.windows.get(*id).map(|w| w.title().to_string());
        DesktopSnapshot {
            screen: self.screen.size,
            fullscreen: self.fullscreen,
            windows: self
                .windows
                .iter()
                .map(|w| WindowSnapshot {
                    title: w.title.clone(),
                    rect: w.rect(),
                    state: w.state(),
                    color: w.color,
                    options: w.dynamic_options().len(),
                })
                .collect(),
            taskbar: self.taskbar.windows().iter().filter_map(title_of).collect(),
            menus: self.menus.kinds().into_iter().map(String::from).collect(),
            selected: self.selected.as_ref().and_then(title_of),
        }
    }
}
