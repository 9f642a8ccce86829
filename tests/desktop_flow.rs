use deskwm_lib::geometry::{Color, Point, Rect, Size};
use deskwm_lib::input_handler::{InputEvent, Key, MouseButton};
use deskwm_lib::popup::Popup;
use deskwm_lib::state::window::{Window, WindowState};
use deskwm_lib::surface::{DrawOp, MonospaceMetrics, RecordingSurface};
use deskwm_lib::{Application, DesktopConfig};

fn desktop() -> Application {
    Application::new(&DesktopConfig::default(), Size::new(1600, 1200))
}

fn left(x: i32, y: i32) -> InputEvent {
    InputEvent::press(MouseButton::Left, x, y)
}

fn right(x: i32, y: i32) -> InputEvent {
    InputEvent::press(MouseButton::Right, x, y)
}

fn send(app: &mut Application, events: &[InputEvent]) {
    for event in events {
        app.handle_event(event);
    }
}

/// Click a row of the open main menu by index
fn click_menu_row(app: &mut Application, index: usize) -> Point {
    let row = match app.menus().top() {
        Some(Popup::MainMenu(menu)) => menu.option_rect(index).center(),
        other => panic!("expected main menu on top, got {:?}", other.map(|p| p.kind())),
    };
    app.handle_event(&left(row.x, row.y));
    row
}

#[test]
fn test_two_new_windows_with_distinct_titles() {
    let mut app = desktop();
    send(&mut app, &[InputEvent::ctrl('n'), InputEvent::ctrl('n')]);

    let titles: Vec<String> = app.windows().iter().map(|w| w.title.clone()).collect();
    assert_eq!(titles, vec!["Main Window", "Window 2", "Window 3"]);
}

#[test]
fn test_context_menu_opens_at_click_and_closes_on_outside_click() {
    let mut app = desktop();
    send(&mut app, &[InputEvent::ctrl('n'), InputEvent::ctrl('n')]);

    let top = app.windows().topmost().unwrap();
    let (top_id, click) = (top.id(), top.rect().center());
    app.handle_event(&right(click.x, click.y));

    assert_eq!(app.menus().len(), 1);
    match app.menus().top() {
        Some(Popup::MainMenu(menu)) => {
            assert_eq!(menu.rect().top_left(), click);
            assert_eq!(menu.target(), top_id);
        }
        other => panic!("expected main menu, got {:?}", other.map(|p| p.kind())),
    }

    // Far corner of the desktop, above the taskbar
    app.handle_event(&left(5, 5));
    assert!(app.menus().is_empty());
    // The outside click only closed the menu; nothing got selected
    assert_eq!(app.selected(), None);
}

#[test]
fn test_new_option_six_times_paginates() {
    let mut app = desktop();
    app.handle_event(&right(150, 150));
    for _ in 0..6 {
        click_menu_row(&mut app, 2);
    }

    let options: Vec<String> = app
        .windows()
        .topmost()
        .unwrap()
        .dynamic_options()
        .iter()
        .map(|o| o.name.clone())
        .collect();
    assert_eq!(options.len(), 6);
    assert_eq!(options[5], "Option 6");

    match app.menus().top() {
        Some(Popup::MainMenu(menu)) => {
            assert!(menu.has_multiple_pages());
            assert_eq!(menu.total_pages(), 2);
            assert_eq!(menu.current_page(), 1);
        }
        other => panic!("expected main menu, got {:?}", other.map(|p| p.kind())),
    }
    assert_eq!(app.menus().len(), 1);
}

#[test]
fn test_right_click_pops_one_level() {
    let mut app = desktop();
    app.handle_event(&right(150, 150));
    click_menu_row(&mut app, 1);
    assert_eq!(app.menus().kinds(), vec!["MainMenu", "Help"]);

    app.handle_event(&right(700, 500));
    assert_eq!(app.menus().kinds(), vec!["MainMenu"]);
    app.handle_event(&right(160, 160));
    assert!(app.menus().is_empty());
}

#[test]
fn test_editing_an_option_renames_it() {
    let mut app = desktop();
    app.handle_event(&right(150, 150));
    click_menu_row(&mut app, 2);
    click_menu_row(&mut app, 3);
    assert_eq!(app.menus().kinds(), vec!["MainMenu", "EditablePopup"]);

    let editor = app.menus().top().unwrap().rect();
    app.handle_event(&left(editor.x + 10, editor.y + 10));
    for _ in 0.."Option 1".len() {
        app.handle_event(&InputEvent::key(Key::Backspace));
    }
    for ch in "Notes".chars() {
        app.handle_event(&InputEvent::key(Key::Char(ch)));
    }
    app.handle_event(&InputEvent::key(Key::Enter));

    let window = app.windows().topmost().unwrap();
    assert_eq!(window.dynamic_options()[0].name, "Notes");
}

#[test]
fn test_rgb_slider_recolors_target_live() {
    let mut app = desktop();
    app.handle_event(&right(150, 150));
    let at = click_menu_row(&mut app, 0);
    assert_eq!(app.menus().kinds(), vec!["MainMenu", "RGBProperties"]);

    let slider = match app.menus().top() {
        Some(Popup::Rgb(rgb)) => rgb.slider_rect(0),
        _ => panic!("rgb popup missing"),
    };
    assert_eq!(slider.top_left(), Point::new(at.x + 20, at.y + 60));

    send(
        &mut app,
        &[
            left(slider.x + 5, slider.y + 5),
            InputEvent::motion(slider.right(), slider.y + 5),
            InputEvent::release(MouseButton::Left, slider.right(), slider.y + 5),
        ],
    );
    let color = app.windows().topmost().map(|w| w.color);
    assert_eq!(color, Some(Color::rgb(255, 100, 250)));
}

#[test]
fn test_drag_moves_window_and_selects_it() {
    let mut app = desktop();
    let main = app.windows().topmost().unwrap().id();
    send(
        &mut app,
        &[
            left(150, 110),
            InputEvent::motion(250, 210),
            InputEvent::release(MouseButton::Left, 250, 210),
            InputEvent::motion(400, 400),
        ],
    );
    assert_eq!(app.selected(), Some(main));
    assert_eq!(app.windows().get(main).unwrap().rect(), Rect::new(200, 200, 300, 200));
}

#[test]
fn test_minimize_to_taskbar_and_restore() {
    let mut app = desktop();
    let main = app.windows().topmost().unwrap();
    let (id, button) = (main.id(), main.minimize_button().center());

    app.handle_event(&left(button.x, button.y));
    assert_eq!(app.taskbar().windows(), &[id]);
    assert_eq!(app.windows().get(id).unwrap().state(), WindowState::Minimized);

    let taskbar_button = app.taskbar().button_rect(0).center();
    app.handle_event(&left(taskbar_button.x, taskbar_button.y));
    assert!(app.taskbar().windows().is_empty());
    let restored = app.windows().get(id).unwrap();
    assert_eq!(restored.state(), WindowState::Normal);
    assert_eq!(restored.rect(), Rect::new(100, 100, 300, 200));
}

#[test]
fn test_minimize_click_selects_overlapped_window_below() {
    let mut app = desktop();
    let main = app.windows().topmost().unwrap().id();
    let covering = app.windows_mut().spawn_window("Covering", Rect::new(50, 150, 300, 200));
    let button = app.windows().get(covering).unwrap().minimize_button().center();
    assert!(app.windows().get(main).unwrap().rect().contains(button));

    app.handle_event(&left(button.x, button.y));
    assert_eq!(app.taskbar().windows(), &[covering]);
    assert_eq!(app.selected(), Some(main));
    assert_eq!(app.windows().topmost().unwrap().id(), main);
}

#[test]
fn test_resize_rescales_windows_and_taskbar() {
    let mut app = desktop();
    app.handle_event(&InputEvent::Resize {
        width: 1600,
        height: 600,
    });
    assert_eq!(app.screen().size, Size::new(1600, 600));
    assert_eq!(app.windows().topmost().map(|w| w.rect()), Some(Rect::new(200, 100, 600, 200)));
    assert_eq!(app.taskbar().rect(), Rect::new(0, 560, 1600, 40));

    // Shrinking floors at the minimum window size
    app.handle_event(&InputEvent::Resize {
        width: 400,
        height: 300,
    });
    let rect = app.windows().topmost().map(|w| w.rect());
    assert_eq!(rect, Some(Rect::new(50, 50, 200, 150)));
}

#[test]
fn test_fullscreen_toggle_round_trip() {
    let mut app = desktop();
    app.handle_event(&InputEvent::ctrl('f'));
    assert!(app.is_fullscreen());
    assert_eq!(app.screen().size, Size::new(1600, 1200));
    assert_eq!(app.taskbar().rect(), Rect::new(0, 1160, 1600, 40));
    assert_eq!(app.windows().topmost().map(|w| w.rect()), Some(Rect::new(200, 200, 600, 400)));

    app.handle_event(&InputEvent::ctrl('F'));
    assert!(!app.is_fullscreen());
    assert_eq!(app.screen().size, Size::new(800, 600));
    assert_eq!(app.windows().topmost().map(|w| w.rect()), Some(Rect::new(100, 100, 300, 200)));
}

#[test]
fn test_popups_close_when_target_minimized() {
    let mut app = desktop();
    send(
        &mut app,
        &[left(150, 150), InputEvent::release(MouseButton::Left, 150, 150), right(150, 150)],
    );
    click_menu_row(&mut app, 1);
    assert_eq!(app.menus().len(), 2);

    app.handle_event(&InputEvent::ctrl('w'));
    app.update();
    assert!(app.menus().is_empty());
    assert_eq!(app.taskbar().windows().len(), 1);
}

#[test]
fn test_frame_draws_background_windows_popups_taskbar() {
    let mut app = desktop();
    let mut surface = RecordingSurface::new(MonospaceMetrics::default());
    app.frame(vec![right(150, 150), InputEvent::motion(250, 172)], &mut surface);

    assert_eq!(
        surface.ops.first(),
        Some(&DrawOp::Fill {
            rect: Rect::new(0, 0, 800, 600),
            color: Color::rgb(30, 30, 30),
            style: deskwm_lib::surface::RectStyle::FILL,
        })
    );

    let window = surface.position_of_text("Main Window");
    let menu = surface.position_of_text("RGB");
    let taskbar = surface.ops.iter().position(|op| {
        matches!(op, DrawOp::Fill { color, rect, .. }
            if *color == Color::rgb(50, 50, 50) && *rect == Rect::new(0, 560, 800, 40))
    });
    assert!(window.is_some() && menu.is_some() && taskbar.is_some());
    assert!(window < menu);
    assert!(menu < taskbar);

    // Cursor rests over the first row: it is highlighted
    let row = Rect::new(160, 160, 180, 25);
    assert!(surface.ops.iter().any(|op| matches!(op,
        DrawOp::Fill { rect, color, .. } if *rect == row && *color == Color::rgb(150, 150, 150))));
}
