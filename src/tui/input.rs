//! Terminal event to action mapping
//!
//! Pure functions so the bindings can be tested without a terminal.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::app::{Action, App, HoldSource, ScreenAreas};

/// Map any terminal event to an action
pub fn map_event(app: &App, event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key, app.key_release_events, app.show_help),
        Event::Mouse(mouse) => map_mouse(mouse, &app.areas, app.mouse_holding()),
        // Losing focus means we may never see the release
        Event::FocusLost => Some(Action::ReleaseAll),
        _ => None,
    }
}

fn is_hold_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char('k') | KeyCode::Char('K'))
}

/// Map a key event.
///
/// Hold keys need release reporting; everything else fires on press only.
pub fn map_key(key: &KeyEvent, release_events: bool, help_open: bool) -> Option<Action> {
    if is_hold_key(key.code) {
        return match (release_events, key.kind) {
            (true, KeyEventKind::Press) => Some(Action::PressStart(HoldSource::Key)),
            (true, KeyEventKind::Release) => Some(Action::PressEnd(HoldSource::Key)),
            (true, KeyEventKind::Repeat) => None,
            (false, KeyEventKind::Press) => Some(Action::HoldKeyUnsupported),
            (false, _) => None,
        };
    }

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc if help_open => Some(Action::CloseHelp),
        KeyCode::Char('/') | KeyCode::Tab => Some(Action::Space),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('r') | KeyCode::Delete => Some(Action::Reset),
        _ => None,
    }
}

/// Map a mouse event against the button regions of the last frame
pub fn map_mouse(mouse: &MouseEvent, areas: &ScreenAreas, holding: bool) -> Option<Action> {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if rect_contains(areas.press, col, row) {
                Some(Action::PressStart(HoldSource::Mouse))
            } else if rect_contains(areas.space, col, row) {
                Some(Action::Space)
            } else if rect_contains(areas.backspace, col, row) {
                Some(Action::Backspace)
            } else if rect_contains(areas.reset, col, row) {
                Some(Action::Reset)
            } else {
                None
            }
        }
        // Releasing anywhere ends the hold, like lifting a finger off the pad
        MouseEventKind::Up(MouseButton::Left) if holding => {
            Some(Action::PressEnd(HoldSource::Mouse))
        }
        _ => None,
    }
}

fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
