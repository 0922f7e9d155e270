//! Grammar assembly and terminal-dispatch scanning for Tessera.
//!
//! A [`GrammarBuilder`] collects [`Terminal`] implementations and
//! freezes them into an immutable [`Grammar`]: ids in declaration order,
//! structural pairs resolved, every terminal initialized exactly once,
//! and a per-character dispatch index ordered by descending priority.
//! [`Scanner`] then drives the terminal contract over one source.
//!
//! ```
//! use tessera_scanner::terminals::{FixedTerminal, IdentTerminal, NumberTerminal};
//! use tessera_scanner::GrammarBuilder;
//! use tessera_core::SourceBuffer;
//!
//! let grammar = GrammarBuilder::new("calc")
//!     .terminal(IdentTerminal::new("identifier"))
//!     .terminal(NumberTerminal::new("number"))
//!     .terminal(FixedTerminal::new("+"))
//!     .keywords("identifier", &["let"])
//!     .build()?;
//!
//! let source = SourceBuffer::new("let total = 1 + 2");
//! let tokens = grammar.scanner(&source).scan_all()?;
//! assert_eq!(Some(tokens[0].terminal), grammar.terminal_id("let"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dispatch;
mod error;
mod grammar;
mod keyword;
mod scanner;
pub mod terminals;

pub use error::{GrammarError, ScanError};
pub use grammar::{Grammar, GrammarBuilder};
pub use keyword::KeywordValidator;
pub use scanner::Scanner;

// The contract types are canonical in `tessera_core`; re-exported here
// so scanner users need a single dependency.
pub use tessera_core::{
    AstKind, GrammarData, GrammarFlags, ScanContext, SourceBuffer, SourceCursor, Span,
    TermFlags, TermInfo, Terminal, TerminalId, Token, TokenCategory, TokenRejection,
    TokenValidation, TokenValidator, TokenValue,
};
