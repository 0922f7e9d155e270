//! Identifier terminal.

use tessera_core::{
    ScanContext, SourceCursor, Span, TermInfo, Terminal, Token, TokenValue,
};

use super::{is_ident_continue, is_ident_start};

/// Matches `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Produces [`TokenValue::Str`] with the identifier text. Keyword
/// reclassification is not this terminal's job; grammars attach a
/// keyword validator for that (see
/// [`GrammarBuilder::keywords`](crate::GrammarBuilder::keywords)).
pub struct IdentTerminal {
    info: TermInfo,
}

impl IdentTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        IdentTerminal {
            info: TermInfo::new(name),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.info.set_priority(priority);
        self
    }
}

impl Terminal for IdentTerminal {
    fn info(&self) -> &TermInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TermInfo {
        &mut self.info
    }

    fn try_match(
        &self,
        _context: &mut ScanContext,
        cursor: &mut SourceCursor<'_>,
    ) -> Option<Token> {
        if !is_ident_start(cursor.current()) {
            return None;
        }
        let start = cursor.pos();
        cursor.advance();
        cursor.eat_while(is_ident_continue);
        let text = cursor.slice_from(start);
        Some(Token::new(
            self.info.id(),
            Span::new(start, cursor.pos()),
            text,
            TokenValue::Str(text.to_string()),
            self.info.category(),
        ))
    }

    fn firsts(&self) -> Option<Vec<char>> {
        let mut firsts: Vec<char> = ('a'..='z').chain('A'..='Z').collect();
        firsts.push('_');
        Some(firsts)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use tessera_core::SourceBuffer;

    fn match_at(source: &str) -> Option<Token> {
        let ident = IdentTerminal::new("identifier");
        let buf = SourceBuffer::new(source);
        let mut cursor = buf.cursor();
        let mut context = ScanContext::new();
        ident.try_match(&mut context, &mut cursor)
    }

    #[test]
    fn matches_full_identifier() {
        let token = match_at("foo_bar2 = 1");
        assert_eq!(token.map(|t| t.text), Some("foo_bar2".to_string()));
    }

    #[test]
    fn leading_underscore_is_an_identifier() {
        let token = match_at("_private");
        assert_eq!(token.map(|t| t.text), Some("_private".to_string()));
    }

    #[test]
    fn digit_start_is_no_match() {
        let ident = IdentTerminal::new("identifier");
        let buf = SourceBuffer::new("1abc");
        let mut cursor = buf.cursor();
        let mut context = ScanContext::new();
        assert!(ident.try_match(&mut context, &mut cursor).is_none());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn value_carries_identifier_text() {
        let token = match_at("count");
        assert_eq!(
            token.map(|t| t.value),
            Some(TokenValue::Str("count".to_string()))
        );
    }

    #[test]
    fn firsts_covers_letters_and_underscore() {
        let ident = IdentTerminal::new("identifier");
        let firsts = ident.firsts().unwrap_or_default();
        assert_eq!(firsts.len(), 53);
        assert!(firsts.contains(&'a'));
        assert!(firsts.contains(&'Z'));
        assert!(firsts.contains(&'_'));
        assert!(!firsts.contains(&'1'));
    }

    /// Firsts soundness: outside the declared set, `try_match` never
    /// succeeds.
    #[test]
    fn never_matches_outside_firsts() {
        let ident = IdentTerminal::new("identifier");
        let firsts = ident.firsts().unwrap_or_default();
        for source in ["1x", "+y", " z", "\"s\"", "9"] {
            let first_char = source.chars().next().unwrap_or('\0');
            assert!(!firsts.contains(&first_char));
            let buf = SourceBuffer::new(source);
            let mut cursor = buf.cursor();
            let mut context = ScanContext::new();
            assert!(ident.try_match(&mut context, &mut cursor).is_none());
        }
    }
}
