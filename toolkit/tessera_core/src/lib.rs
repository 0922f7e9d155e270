//! Terminal contract and source primitives for the Tessera toolkit.
//!
//! This crate is standalone (zero `tessera_*` dependencies) so editor
//! services and external tools can consume the contract without pulling
//! in the scanner. It provides:
//!
//! - [`SourceBuffer`] / [`SourceCursor`]: sentinel-terminated source access
//! - [`Token`], [`TokenValue`], [`TokenCategory`]: match results
//! - [`Terminal`]: the polymorphic contract every lexical category
//!   implements, with the fast-dispatch hint ([`Terminal::firsts`]) and
//!   the post-match validation hook
//! - [`by_name`] / [`by_priority_desc`]: disambiguation orderings
//!
//! # Matching protocol
//!
//! A scanner holds a set of [`Terminal`]s, indexes them by the characters
//! returned from [`Terminal::firsts`], and at each input position tries
//! the candidates for the current character in [`by_priority_desc`] order.
//! A terminal that matches returns a fresh [`Token`]; a terminal that does
//! not match returns `None` and must leave the cursor position unchanged
//! so the next candidate can be tried from the same position.

mod context;
mod cursor;
mod flags;
mod grammar_data;
mod source_buffer;
mod span;
mod terminal;
mod token;
mod validate;

pub use context::ScanContext;
pub use cursor::SourceCursor;
pub use flags::{GrammarFlags, TermFlags};
pub use grammar_data::{AstKind, GrammarData};
pub use source_buffer::{SourceBuffer, SourceTooLarge};
pub use span::{Span, SpanError};
pub use terminal::{
    by_name, by_priority_desc, EditorInfo, TermInfo, Terminal, TerminalId, HIGHEST_PRIORITY,
    LOWEST_PRIORITY,
};
pub use token::{Token, TokenCategory, TokenValue};
pub use validate::{TokenRejection, TokenValidation, TokenValidator};
