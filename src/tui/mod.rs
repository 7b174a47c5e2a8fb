//! TUI (Terminal User Interface) for the transmitter
//!
//! One screen: the message log, a hold gauge, the press pad and the three
//! editing buttons.

pub mod app;
pub mod input;
pub mod render;

pub use app::{Action, App, HoldSource, ScreenAreas};
