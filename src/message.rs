//! The editable message log

use std::fmt;

use crate::symbol::Symbol;

/// Symbols in transmission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    symbols: Vec<Symbol>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Remove the last symbol. Empty log: nothing happens.
    pub fn backspace(&mut self) -> Option<Symbol> {
        self.symbols.pop()
    }

    /// Drop every symbol, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.symbols.len();
        self.symbols.clear();
        count
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// One glyph string per symbol, in order
    pub fn glyphs(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.to_string()).collect()
    }
}

impl fmt::Display for MessageLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut log = MessageLog::new();
        assert_eq!(log.backspace(), None);
        assert_eq!(log.backspace(), None);
        assert!(log.is_empty());
    }

    #[test]
    fn test_backspace_removes_last() {
        let mut log = MessageLog::new();
        log.push(Symbol::Dot);
        log.push(Symbol::Dash);
        assert_eq!(log.backspace(), Some(Symbol::Dash));
        assert_eq!(log.symbols(), &[Symbol::Dot]);
    }

    #[test]
    fn test_clear() {
        let mut log = MessageLog::new();
        assert_eq!(log.clear(), 0);
        log.push(Symbol::Dash);
        log.push(Symbol::WordSpace);
        assert_eq!(log.clear(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let mut log = MessageLog::new();
        log.push(Symbol::Dot);
        log.push(Symbol::Dash);
        log.push(Symbol::WordSpace);
        log.push(Symbol::Dot);
        assert_eq!(log.glyphs(), vec![".", "-", "/", "."]);
        assert_eq!(log.to_string(), ".-/.");
    }
}
