//! Token types produced by terminal match attempts.

use std::fmt;

use crate::{Span, TerminalId};

/// Classifies whether a terminal contributes to the visible token stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TokenCategory {
    /// Regular content token, fed to the parser.
    #[default]
    Content,
    /// Structural punctuation (delimiters, separators). Terminals in
    /// this category are implicitly non-significant.
    Outline,
    /// Comment trivia.
    Comment,
    /// Compiler/preprocessor directive.
    Directive,
    /// Produced by the scanner for unrecognized input.
    Error,
}

/// Derived value of a matched token.
///
/// `None` means the raw matched text is the value, which is the common
/// case for fixed-text terminals.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum TokenValue {
    /// No derived value; the matched text stands for itself.
    #[default]
    None,
    /// Textual value (identifier text, unescaped string content).
    Str(String),
    /// Integer literal value.
    Int(u64),
    /// Floating-point literal value.
    Float(f64),
}

impl TokenValue {
    /// The value rendered as text, or `None` when the raw matched text
    /// is the value. Used by diagnostic formatting.
    pub fn value_text(&self) -> Option<String> {
        match self {
            TokenValue::None => None,
            TokenValue::Str(s) => Some(s.clone()),
            TokenValue::Int(n) => Some(n.to_string()),
            TokenValue::Float(x) => Some(x.to_string()),
        }
    }
}

/// A token produced by a successful match attempt.
///
/// Each [`Terminal::try_match`](crate::Terminal::try_match) call that
/// succeeds produces a fresh token; tokens are never owned or reused by
/// the terminal. The `terminal` field is the back-reference to the
/// producing terminal within its grammar.
#[derive(Clone, PartialEq)]
pub struct Token {
    /// Id of the terminal that produced (or, after validation, now
    /// claims) this token.
    pub terminal: TerminalId,
    /// Byte range of the matched text in the source.
    pub span: Span,
    /// The matched source text.
    pub text: String,
    /// Derived value.
    pub value: TokenValue,
    /// Category, copied from the producing terminal.
    pub category: TokenCategory,
}

impl Token {
    pub fn new(
        terminal: TerminalId,
        span: Span,
        text: impl Into<String>,
        value: TokenValue,
        category: TokenCategory,
    ) -> Self {
        Token {
            terminal,
            span,
            text: text.into(),
            value,
            category,
        }
    }

    /// Whether this token belongs to the significant token stream.
    #[inline]
    pub fn is_significant(&self) -> bool {
        matches!(self.category, TokenCategory::Content)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.text, self.span)
    }
}
