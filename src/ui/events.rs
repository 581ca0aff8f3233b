use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::{Duration, Instant};

use super::app::App;

/// Poll timeout; doubles as the UI frame interval (~60 FPS)
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Wait briefly for one terminal event and apply it to the app
pub fn handle_events(app: &mut App) -> anyhow::Result<()> {
    if event::poll(POLL_INTERVAL)? {
        let now = Instant::now();
        match event::read()? {
            Event::Key(key) => handle_key_event(app, key, now),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse, now),
            // Viewport is refreshed on the next draw
            _ => {}
        }
    }
    Ok(())
}

/// Process individual key press
fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    // Some platforms report releases and repeats too
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char(c) => {
            app.press_key(c, now);
        }
        _ => {}
    }
}

/// Buttons fire on press, not release, like a touch-start
fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        app.press_at(mouse.column, mouse.row, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::DrumPad;
    use crate::types::events::KitEvent;
    use crate::ui::layout::{button_areas, screen_layout};
    use crossbeam_channel::{Receiver, unbounded};
    use crossterm::event::KeyEventState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::layout::Rect;

    fn app() -> (App, Receiver<KitEvent>) {
        let (tx, rx) = unbounded();
        let mut app = App::new(tx, Duration::from_millis(1000), StdRng::seed_from_u64(9));
        app.viewport = Rect::new(0, 0, 120, 30);
        (app, rx)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_pad_key_triggers() {
        let (mut app, rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('f'), KeyModifiers::NONE), Instant::now());

        assert_eq!(rx.try_recv(), Ok(KitEvent::Trigger(DrumPad::F)));
        assert_eq!(app.animation.current_pad(), Some(DrumPad::F));
    }

    #[test]
    fn test_shifted_pad_key_triggers() {
        let (mut app, rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('F'), KeyModifiers::SHIFT), Instant::now());

        assert_eq!(rx.try_recv(), Ok(KitEvent::Trigger(DrumPad::F)));
    }

    #[test]
    fn test_key_release_ignored() {
        let (mut app, rx) = app();
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key_event(&mut app, release, Instant::now());

        assert!(rx.try_recv().is_err());
        assert_eq!(app.animation.current_pad(), None);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let (mut app, rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('z'), KeyModifiers::NONE), Instant::now());
        handle_key_event(&mut app, key(KeyCode::Enter, KeyModifiers::NONE), Instant::now());

        assert!(rx.try_recv().is_err());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let (mut app, rx) = app();
            handle_key_event(&mut app, event, Instant::now());
            assert!(app.should_quit, "{:?} should quit", event);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn test_help_toggle() {
        let (mut app, _rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('?'), KeyModifiers::SHIFT), Instant::now());
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('?'), KeyModifiers::SHIFT), Instant::now());
        assert!(!app.show_help);
    }

    #[test]
    fn test_left_press_on_button_triggers() {
        let (mut app, rx) = app();
        let (pad, rect) = button_areas(screen_layout(app.viewport).buttons)[5];

        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), rect.x + 1, rect.y + 1),
            Instant::now(),
        );

        assert_eq!(pad, DrumPad::H);
        assert_eq!(rx.try_recv(), Ok(KitEvent::Trigger(DrumPad::H)));
        assert!(app.is_active(DrumPad::H));
    }

    #[test]
    fn test_release_and_other_buttons_ignored() {
        let (mut app, rx) = app();
        let (_, rect) = button_areas(screen_layout(app.viewport).buttons)[0];

        for kind in [
            MouseEventKind::Up(MouseButton::Left),
            MouseEventKind::Down(MouseButton::Right),
            MouseEventKind::Moved,
        ] {
            handle_mouse_event(&mut app, mouse(kind, rect.x + 1, rect.y + 1), Instant::now());
        }

        assert!(rx.try_recv().is_err());
        assert_eq!(app.animation.current_pad(), None);
    }
}
