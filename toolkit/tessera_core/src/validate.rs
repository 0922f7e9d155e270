//! Post-match token validation.
//!
//! Validators let a grammar rewrite a tentative match before the scanner
//! accepts it (keyword-vs-identifier reclassification, case folding)
//! without introducing a new terminal subtype. Each terminal carries an
//! ordered list of validators, run in registration order.
//!
//! Validators receive an immutable [`TokenValidation`] snapshot built per
//! call and return an owned replacement (or nothing). There is no shared
//! scratch record, so a grammar's terminals can be shared freely across
//! scanner threads.

use std::fmt;

use crate::{ScanContext, SourceCursor, Span, TerminalId, Token};

/// Validator contract violation.
///
/// Returned when a validator finds the in-flight token unacceptable in a
/// way the scanner cannot recover from at this position. Propagated to
/// the scanner as a scan failure, never silently ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRejection {
    /// Location of the rejected token.
    pub span: Span,
    /// What the validator objected to.
    pub reason: String,
}

impl TokenRejection {
    pub fn new(span: Span, reason: impl Into<String>) -> Self {
        TokenRejection {
            span,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token rejected at {}: {}", self.span, self.reason)
    }
}

impl std::error::Error for TokenRejection {}

/// Immutable snapshot handed to each validator call.
///
/// Valid only for the duration of the call; all fields are borrows into
/// the scanner's state. Replacements are returned as owned values, never
/// written back through the snapshot.
pub struct TokenValidation<'a> {
    /// Scan-wide state at the point of the match.
    pub context: &'a ScanContext,
    /// Read-only cursor positioned after the matched text, for lookahead.
    pub cursor: &'a SourceCursor<'a>,
    /// Byte offset where the match started.
    pub start: u32,
    /// The candidate terminals tried at this position, in try-order.
    pub candidates: &'a [TerminalId],
    /// The token under validation.
    pub token: &'a Token,
}

/// A post-match validation hook.
///
/// `Ok(None)` keeps the in-flight token, `Ok(Some(t))` replaces it (later
/// validators in the list see the replacement), `Err` aborts the scan at
/// this position.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, validation: &TokenValidation<'_>)
        -> Result<Option<Token>, TokenRejection>;
}

impl<F> TokenValidator for F
where
    F: Fn(&TokenValidation<'_>) -> Result<Option<Token>, TokenRejection> + Send + Sync,
{
    fn validate(
        &self,
        validation: &TokenValidation<'_>,
    ) -> Result<Option<Token>, TokenRejection> {
        self(validation)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{SourceBuffer, TokenCategory, TokenValue};

    fn ident_token() -> Token {
        Token::new(
            TerminalId::new(0),
            Span::new(0, 2),
            "if",
            TokenValue::Str("if".into()),
            TokenCategory::Content,
        )
    }

    #[test]
    fn closure_validators_implement_the_trait() {
        let validator =
            |v: &TokenValidation<'_>| -> Result<Option<Token>, TokenRejection> {
                assert_eq!(v.start, 0);
                Ok(None)
            };

        let buf = SourceBuffer::new("if");
        let cursor = buf.cursor();
        let context = ScanContext::new();
        let token = ident_token();
        let validation = TokenValidation {
            context: &context,
            cursor: &cursor,
            start: 0,
            candidates: &[TerminalId::new(0)],
            token: &token,
        };
        assert_eq!(validator.validate(&validation), Ok(None));
    }

    #[test]
    fn rejection_displays_span_and_reason() {
        let rejection = TokenRejection::new(Span::new(3, 7), "cleared token");
        assert_eq!(
            rejection.to_string(),
            "token rejected at 3..7: cleared token"
        );
    }
}
