//! Grammar-build and scan error types.
//!
//! Configuration errors surface at grammar build time and are fatal to
//! grammar construction; the scanner never sees a misconfigured grammar.
//! At scan time the only failure is a validator contract violation -
//! ordinary "no terminal matched here" input produces an error *token*,
//! not an error.

use thiserror::Error;

use tessera_core::TokenRejection;

/// Fatal grammar configuration error, reported by
/// [`GrammarBuilder::build`](crate::GrammarBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The grammar defines no terminals.
    #[error("grammar `{grammar}` defines no terminals")]
    EmptyGrammar { grammar: String },

    /// Two terminals share a name.
    #[error("terminal `{name}` is defined more than once")]
    DuplicateTerminal { name: String },

    /// A terminal's priority falls outside the allowed range.
    #[error("terminal `{name}` has priority {priority}, outside [-1000, 1000]")]
    PriorityOutOfRange { name: String, priority: i32 },

    /// A `pair` declaration references a terminal name that was never
    /// registered.
    #[error("pair declaration references unknown terminal `{name}`")]
    UnknownPairTerminal { name: String },

    /// A validator or keyword set targets a terminal name that was never
    /// registered.
    #[error("validator declaration references unknown terminal `{name}`")]
    UnknownValidatorTarget { name: String },
}

/// Unrecoverable scan failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A validator rejected an accepted match; see
    /// [`TokenRejection`].
    #[error(transparent)]
    TokenRejected(#[from] TokenRejection),
}
