//! The dispatch scanner.
//!
//! At each input position the scanner skips inter-token whitespace,
//! looks up the candidate terminals for the current character, and tries
//! them in priority order. Every accepted match passes through the
//! terminal's validation hook before the scanner hands it out. A
//! position no candidate claims produces a one-character error token and
//! scanning continues.

use tracing::trace;

use tessera_core::{
    ScanContext, SourceBuffer, SourceCursor, Span, Token, TokenValue,
};

use crate::{Grammar, ScanError};

/// Scans one source with one grammar.
///
/// Scanners are cheap to create; a grammar can serve any number of them,
/// concurrently or not.
pub struct Scanner<'g, 's> {
    grammar: &'g Grammar,
    cursor: SourceCursor<'s>,
    context: ScanContext,
    reached_eof: bool,
}

impl<'g, 's> Scanner<'g, 's> {
    pub fn new(grammar: &'g Grammar, source: &'s SourceBuffer) -> Self {
        Scanner {
            grammar,
            cursor: source.cursor(),
            context: ScanContext::new(),
            reached_eof: false,
        }
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` only after the end-of-input token has been
    /// handed out. Comment and outline trivia are returned like any
    /// other token; callers filter on
    /// [`Token::is_significant`](tessera_core::Token::is_significant).
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        if self.reached_eof {
            return Ok(None);
        }
        self.skip_whitespace();
        if self.cursor.is_eof() {
            self.reached_eof = true;
            return Ok(Some(self.eof_token()));
        }

        let grammar = self.grammar;
        let ch = self.cursor.current_char();
        let candidates = grammar.dispatch().candidates(ch);
        for &id in candidates {
            let saved = self.cursor;
            let terminal = grammar.terminal(id);
            trace!(
                terminal = terminal.info().name(),
                pos = saved.pos(),
                "trying candidate"
            );
            if let Some(token) = terminal.try_match(&mut self.context, &mut self.cursor) {
                let validated = terminal
                    .invoke_validate_token(&self.context, &self.cursor, candidates, token)
                    .map_err(ScanError::TokenRejected)?;
                trace!(token = ?validated, "accepted");
                if validated.is_significant() {
                    self.context.previous = Some(validated.clone());
                }
                return Ok(Some(validated));
            }
            debug_assert_eq!(
                self.cursor.pos(),
                saved.pos(),
                "`{}` advanced the cursor on a no-match",
                terminal.info().name()
            );
            self.cursor = saved;
        }

        Ok(Some(self.error_token(ch)))
    }

    /// Scan to the end of the source, returning every token including
    /// trivia, error tokens, and the final end-of-input token.
    pub fn scan_all(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Scan to the end of the source, keeping only significant tokens
    /// and the final end-of-input token.
    pub fn scan_significant(self) -> Result<Vec<Token>, ScanError> {
        let eof = self.grammar.eof();
        let mut tokens = self.scan_all()?;
        tokens.retain(|t| t.is_significant() || t.terminal == eof);
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        let whitespace = self.grammar.data().whitespace();
        while !self.cursor.is_eof() {
            let ch = self.cursor.current_char();
            if whitespace.contains(&ch) {
                self.cursor.advance_char();
            } else {
                break;
            }
        }
    }

    fn eof_token(&self) -> Token {
        let position = self.cursor.pos();
        let id = self.grammar.eof();
        Token::new(
            id,
            Span::point(position),
            "",
            TokenValue::None,
            self.grammar.terminal(id).info().category(),
        )
    }

    /// Claim one character under the unrecognized-input terminal.
    fn error_token(&mut self, ch: char) -> Token {
        let start = self.cursor.pos();
        self.cursor.advance_char();
        let span = Span::new(start, self.cursor.pos());
        trace!(%ch, %span, "no candidate matched");
        let id = self.grammar.error_terminal();
        Token::new(
            id,
            span,
            self.cursor.slice(span.start, span.end),
            TokenValue::None,
            self.grammar.terminal(id).info().category(),
        )
    }
}
