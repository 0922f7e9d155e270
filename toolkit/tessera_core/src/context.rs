//! Scan-wide mutable state shared with terminals during matching.

use crate::Token;

/// Mutable scan state a terminal may consult during a match attempt.
///
/// One context exists per scan of a source. Terminals that need lookback
/// (for example a number terminal disambiguating a leading `-` against a
/// preceding value token) read `previous`; the scanner updates it after
/// every accepted significant token.
#[derive(Clone, Debug, Default)]
pub struct ScanContext {
    /// The most recently accepted significant token, if any.
    pub previous: Option<Token>,
}

impl ScanContext {
    pub fn new() -> Self {
        ScanContext::default()
    }
}
