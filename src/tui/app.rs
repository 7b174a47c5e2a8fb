//! TUI application state

use ratatui::layout::Rect;
use tracing::debug;

use crate::transmitter::Transmitter;

/// What started the hold in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldSource {
    Mouse,
    Key,
}

/// Everything the user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PressStart(HoldSource),
    PressEnd(HoldSource),
    /// End whatever hold is active (focus lost)
    ReleaseAll,
    Space,
    Backspace,
    Reset,
    ToggleHelp,
    CloseHelp,
    /// A hold key was pressed but the terminal can't report its release
    HoldKeyUnsupported,
    Quit,
}

/// Button regions from the last frame, for mouse hit-testing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub press: Rect,
    pub space: Rect,
    pub backspace: Rect,
    pub reset: Rect,
}

/// Main application state
pub struct App {
    pub transmitter: Transmitter,
    /// Who owns the current hold; only that source may end it
    pub hold_source: Option<HoldSource>,
    /// Terminal reports key release events
    pub key_release_events: bool,
    /// Status message (for errors/info)
    pub status_message: Option<String>,
    pub areas: ScreenAreas,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(transmitter: Transmitter, key_release_events: bool) -> Self {
        Self {
            transmitter,
            hold_source: None,
            key_release_events,
            status_message: None,
            areas: ScreenAreas::default(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn apply(&mut self, action: Action) {
        debug!("Action: {:?}", action);
        match action {
            Action::PressStart(source) => {
                if self.hold_source.is_none() {
                    self.status_message = None;
                    self.hold_source = Some(source);
                    self.transmitter.on_press_start();
                }
            }
            Action::PressEnd(source) => {
                if self.hold_source == Some(source) {
                    self.end_hold();
                }
            }
            Action::ReleaseAll => self.end_hold(),
            Action::Space => {
                self.status_message = None;
                self.transmitter.on_space();
            }
            Action::Backspace => {
                self.status_message = None;
                self.transmitter.on_backspace();
            }
            Action::Reset => {
                self.transmitter.on_reset();
                self.status_message = Some("Message cleared".to_string());
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::CloseHelp => self.show_help = false,
            Action::HoldKeyUnsupported => {
                self.status_message = Some(
                    "Terminal doesn't report key release; hold the Press pad with the mouse"
                        .to_string(),
                );
            }
            Action::Quit => {
                self.end_hold();
                self.should_quit = true;
            }
        }
    }

    /// Whether a mouse button is currently holding the pad
    pub fn mouse_holding(&self) -> bool {
        self.hold_source == Some(HoldSource::Mouse)
    }

    fn end_hold(&mut self) {
        if self.hold_source.take().is_some() {
            self.transmitter.on_press_end();
        }
    }
}
