//! Morse Code Transmitter
//!
//! Hold the press surface to key: a short hold logs a dot, a long hold a
//! dash. A sidetone plays for as long as the surface is held. The message
//! log can be edited with word-space, backspace and reset controls.

pub mod config;
pub mod message;
pub mod symbol;
pub mod timer;
pub mod transmitter;
pub mod tui;

pub use config::{KeyerConfig, TimingConfig, ToneConfig};
pub use message::MessageLog;
pub use symbol::{classify, Symbol};
pub use timer::{HoldId, HoldTick, IntervalTicker, TickScheduler, TickTask};
pub use transmitter::{KeyerSettings, Transmitter};
