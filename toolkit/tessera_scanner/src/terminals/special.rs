//! Synthetic terminals registered automatically by the grammar builder.
//!
//! Neither terminal recognizes source text. Both declare an empty firsts
//! set, keeping them out of the dispatch index; the scanner synthesizes
//! their tokens directly (end of input, unrecognized input).

use tessera_core::{TermInfo, Terminal, TokenCategory};

/// Name of the auto-registered end-of-input terminal.
pub const EOF_NAME: &str = "(eof)";
/// Name of the auto-registered unrecognized-input terminal.
pub const SYNTAX_ERROR_NAME: &str = "(error)";

/// End-of-input marker terminal.
///
/// The scanner emits exactly one token of this terminal per scan, after
/// the last source character. The token is significant so parsers see
/// the stream terminator.
pub struct EofTerminal {
    info: TermInfo,
}

impl EofTerminal {
    pub(crate) fn new() -> Self {
        EofTerminal {
            info: TermInfo::new(EOF_NAME),
        }
    }
}

impl Terminal for EofTerminal {
    fn info(&self) -> &TermInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TermInfo {
        &mut self.info
    }

    fn firsts(&self) -> Option<Vec<char>> {
        Some(Vec::new())
    }
}

/// Unrecognized-input terminal.
///
/// When every candidate at a position fails, the scanner claims one
/// character under this terminal and continues; recovery beyond that is
/// a parser concern.
pub struct SyntaxErrorTerminal {
    info: TermInfo,
}

impl SyntaxErrorTerminal {
    pub(crate) fn new() -> Self {
        SyntaxErrorTerminal {
            info: TermInfo::with_category(SYNTAX_ERROR_NAME, TokenCategory::Error),
        }
    }
}

impl Terminal for SyntaxErrorTerminal {
    fn info(&self) -> &TermInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TermInfo {
        &mut self.info
    }

    fn firsts(&self) -> Option<Vec<char>> {
        Some(Vec::new())
    }
}
