//! Concrete implementations of the terminal contract.
//!
//! Each terminal here supplies recognition logic and a constrained
//! firsts set on top of the base contract from `tessera_core`. Grammars
//! compose these; anything they cannot express is written as a new
//! `Terminal` implementation in user code.

mod comment;
mod fixed;
mod ident;
mod number;
mod special;

pub use comment::{DelimitedTerminal, LineCommentTerminal};
pub use fixed::FixedTerminal;
pub use ident::IdentTerminal;
pub use number::NumberTerminal;
pub use special::{EofTerminal, SyntaxErrorTerminal, EOF_NAME, SYNTAX_ERROR_NAME};

/// Whether `byte` can start an identifier.
#[inline]
pub(crate) fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// Whether `byte` can continue an identifier.
#[inline]
pub(crate) fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
