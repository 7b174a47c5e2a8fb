//! Morse symbols and the hold-duration classifier

use std::fmt;
use std::time::Duration;

/// One entry of the message log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short hold
    Dot,
    /// Long hold
    Dash,
    /// Separator inserted by the space control
    WordSpace,
}

impl Symbol {
    /// Glyph shown in the message log
    pub fn glyph(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
            Symbol::WordSpace => '/',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Decide which symbol a hold produced.
///
/// A hold at or above `dash_threshold` is a dash, anything shorter is a dot.
/// There is no minimum: a zero-length hold is still a dot.
pub fn classify(elapsed: Duration, dash_threshold: Duration) -> Symbol {
    if elapsed >= dash_threshold {
        Symbol::Dash
    } else {
        Symbol::Dot
    }
}
