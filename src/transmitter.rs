//! The transmitter: hold tracking, duration measurement and the message log
//!
//! All state lives here and every handler runs to completion. A hold is
//! represented by an [`ActiveHold`] value that owns the live tone and the tick
//! guard; taking it out of the transmitter ends tracking and dropping it
//! releases both, so there is exactly one cleanup path for every way a hold
//! can end.

use std::time::Duration;

use morse_tone::{ToneBackend, ToneSpec, Voice};
use tracing::{debug, info, trace, warn};

use crate::message::MessageLog;
use crate::symbol::{classify, Symbol};
use crate::timer::{HoldId, HoldTick, TickScheduler, TickTask};

/// Timing and tone parameters for the keyer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyerSettings {
    /// How much each tick adds to the elapsed hold time
    pub tick_interval: Duration,
    /// Holds at or above this are dashes
    pub dash_threshold: Duration,
    /// Sidetone played while holding
    pub tone: ToneSpec,
}

impl Default for KeyerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            dash_threshold: Duration::from_millis(100),
            tone: ToneSpec::default(),
        }
    }
}

/// Resources of the hold in progress
struct ActiveHold {
    id: HoldId,
    /// `None` when the tone could not be started
    voice: Option<Voice>,
    _ticks: TickTask,
}

impl Drop for ActiveHold {
    fn drop(&mut self) {
        if let Some(voice) = self.voice.take() {
            voice.stop();
        }
        trace!("Hold {} released", self.id);
    }
}

/// Owns all keyer state
pub struct Transmitter {
    settings: KeyerSettings,
    tone: Box<dyn ToneBackend>,
    ticker: Box<dyn TickScheduler>,
    /// Present exactly while tracking
    hold: Option<ActiveHold>,
    elapsed: Duration,
    last_hold: HoldId,
    log: MessageLog,
    tone_fault: Option<String>,
}

impl Transmitter {
    pub fn new(
        settings: KeyerSettings,
        tone: Box<dyn ToneBackend>,
        ticker: Box<dyn TickScheduler>,
    ) -> Self {
        Self {
            settings,
            tone,
            ticker,
            hold: None,
            elapsed: Duration::ZERO,
            last_hold: 0,
            log: MessageLog::new(),
            tone_fault: None,
        }
    }

    /// The press surface went down
    pub fn on_press_start(&mut self) {
        if self.hold.is_some() {
            trace!("Press start while already tracking, ignored");
            return;
        }

        self.elapsed = Duration::ZERO;
        self.last_hold += 1;
        let id = self.last_hold;

        let ticks = self.ticker.schedule(id, self.settings.tick_interval);

        // A tone failure must never stop the hold from being measured
        let voice = match self.tone.start(&self.settings.tone) {
            Ok(voice) => {
                self.tone_fault = None;
                Some(voice)
            }
            Err(e) => {
                warn!("Tone unavailable ({}): {}", self.tone.name(), e);
                self.tone_fault = Some(e.to_string());
                None
            }
        };

        debug!("Hold {} started", id);
        self.hold = Some(ActiveHold {
            id,
            voice,
            _ticks: ticks,
        });
    }

    /// Periodic tick; only the current hold's ticks count
    pub fn on_tick(&mut self, tick: HoldTick) {
        match &self.hold {
            Some(hold) if hold.id == tick.hold => {
                self.elapsed += self.settings.tick_interval;
            }
            _ => trace!("Stale tick for hold {} dropped", tick.hold),
        }
    }

    /// The press surface came up. Returns the symbol logged, if a hold was active.
    pub fn on_press_end(&mut self) -> Option<Symbol> {
        // Taking the hold ends tracking; it is released when it goes out of
        // scope, whatever happens below
        let hold = self.hold.take()?;

        let symbol = classify(self.elapsed, self.settings.dash_threshold);
        self.log.push(symbol);
        debug!(
            "Hold {} ended after {:?}: {}",
            hold.id, self.elapsed, symbol
        );
        self.elapsed = Duration::ZERO;

        drop(hold);
        Some(symbol)
    }

    /// Append a word-space
    pub fn on_space(&mut self) {
        self.log.push(Symbol::WordSpace);
        debug!("Word space");
    }

    /// Remove the last symbol, if any
    pub fn on_backspace(&mut self) -> Option<Symbol> {
        let removed = self.log.backspace();
        debug!("Backspace: {:?}", removed);
        removed
    }

    /// Clear the message log
    pub fn on_reset(&mut self) {
        let removed = self.log.clear();
        info!("Message reset ({} symbols cleared)", removed);
    }

    pub fn is_tracking(&self) -> bool {
        self.hold.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The symbol releasing right now would produce, while tracking
    pub fn pending_symbol(&self) -> Option<Symbol> {
        self.hold
            .as_ref()
            .map(|_| classify(self.elapsed, self.settings.dash_threshold))
    }

    /// Whether the hold in progress is producing sound
    pub fn is_sounding(&self) -> bool {
        self.hold.as_ref().is_some_and(|h| h.voice.is_some())
    }

    pub fn message(&self) -> &MessageLog {
        &self.log
    }

    pub fn settings(&self) -> &KeyerSettings {
        &self.settings
    }

    pub fn tone_backend(&self) -> &str {
        self.tone.name()
    }

    /// Last tone start failure, cleared by the next successful start
    pub fn tone_fault(&self) -> Option<&str> {
        self.tone_fault.as_deref()
    }
}
