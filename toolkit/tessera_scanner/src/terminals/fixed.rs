//! Fixed-text terminal: keywords, operators, delimiters.

use tessera_core::{
    GrammarData, ScanContext, SourceCursor, Span, TermFlags, TermInfo, Terminal, Token,
    TokenCategory, TokenValue,
};

use super::is_ident_continue;

/// A terminal matching one fixed text.
///
/// The workhorse for keywords, operators, and delimiters. The matched
/// text is the terminal's identity: `token_to_string` for a `+` token of
/// the `+` terminal prints just `+`.
///
/// Keyword-style instances (see [`keyword`](Self::keyword)) additionally
/// require a word boundary after the text, so the `if` terminal does not
/// claim the first two characters of `ifx`.
pub struct FixedTerminal {
    info: TermInfo,
    text: String,
    require_word_boundary: bool,
    /// Captured from the grammar at initialization.
    case_insensitive: bool,
    /// Reserved words are matched only through validation-time
    /// reclassification and stay out of the dispatch index.
    dispatched: bool,
}

impl FixedTerminal {
    /// Terminal named after its text, flagged as a literal.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut info = TermInfo::new(text.clone());
        info.insert_flags(TermFlags::LITERAL);
        FixedTerminal {
            info,
            text,
            require_word_boundary: false,
            case_insensitive: false,
            dispatched: true,
        }
    }

    /// Terminal with a name distinct from its matched text.
    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut terminal = Self::new(text);
        let name = name.into();
        terminal.info = TermInfo::new(name);
        terminal.info.insert_flags(TermFlags::LITERAL);
        terminal.info.set_display_name(terminal.text.clone());
        terminal
    }

    /// Keyword terminal: fixed text plus a trailing word boundary.
    pub fn keyword(text: impl Into<String>) -> Self {
        let mut terminal = Self::new(text);
        terminal.require_word_boundary = true;
        terminal
    }

    /// Punctuation terminal ([`TokenCategory::Outline`]); implicitly
    /// non-significant.
    pub fn punctuation(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut info = TermInfo::with_category(text.clone(), TokenCategory::Outline);
        info.insert_flags(TermFlags::LITERAL);
        FixedTerminal {
            info,
            text,
            require_word_boundary: false,
            case_insensitive: false,
            dispatched: true,
        }
    }

    /// Set the disambiguation priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.info.set_priority(priority);
        self
    }

    /// Set an explicit AST node kind.
    #[must_use]
    pub fn with_ast_kind(mut self, kind: tessera_core::AstKind) -> Self {
        self.info.set_ast_kind(kind);
        self
    }

    /// Keep this terminal out of the dispatch index.
    ///
    /// Reserved words registered through
    /// [`GrammarBuilder::keywords`](crate::GrammarBuilder::keywords) use
    /// this: the identifier terminal matches the text and the keyword
    /// validator reclassifies it, so the reserved word itself is never a
    /// dispatch candidate.
    #[must_use]
    pub fn reserved(mut self) -> Self {
        self.dispatched = false;
        self
    }
}

impl Terminal for FixedTerminal {
    fn info(&self) -> &TermInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TermInfo {
        &mut self.info
    }

    fn initialize(&mut self, grammar: &GrammarData) {
        self.case_insensitive = grammar.case_insensitive();
        self.info.initialize(grammar);
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "fixed terminal text length always fits in u32"
    )]
    fn try_match(
        &self,
        _context: &mut ScanContext,
        cursor: &mut SourceCursor<'_>,
    ) -> Option<Token> {
        let matched = if self.case_insensitive {
            cursor.starts_with_ignore_ascii_case(&self.text)
        } else {
            cursor.starts_with(&self.text)
        };
        if !matched {
            return None;
        }

        let len = self.text.len() as u32;
        if self.require_word_boundary {
            let mut probe = *cursor;
            probe.advance_n(len);
            if is_ident_continue(probe.current()) {
                return None;
            }
        }

        let start = cursor.pos();
        cursor.advance_n(len);
        let span = Span::new(start, cursor.pos());
        // Slice the source rather than echo `self.text`: under
        // case-insensitive matching the source spelling wins.
        let text = cursor.slice(start, cursor.pos());
        Some(Token::new(
            self.info.id(),
            span,
            text,
            TokenValue::None,
            self.info.category(),
        ))
    }

    fn firsts(&self) -> Option<Vec<char>> {
        if !self.dispatched {
            return Some(Vec::new());
        }
        self.text.chars().next().map(|c| vec![c])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use tessera_core::{GrammarFlags, SourceBuffer};

    fn match_at(terminal: &FixedTerminal, source: &str) -> Option<Token> {
        let buf = SourceBuffer::new(source);
        let mut cursor = buf.cursor();
        let mut context = ScanContext::new();
        terminal.try_match(&mut context, &mut cursor)
    }

    #[test]
    fn matches_exact_text() {
        let plus = FixedTerminal::new("+");
        let token = match_at(&plus, "+ 1");
        assert_eq!(token.map(|t| t.text), Some("+".to_string()));
    }

    #[test]
    fn no_match_leaves_cursor_unmoved() {
        let plus = FixedTerminal::new("+");
        let buf = SourceBuffer::new("- 1");
        let mut cursor = buf.cursor();
        let mut context = ScanContext::new();
        assert!(plus.try_match(&mut context, &mut cursor).is_none());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn keyword_requires_word_boundary() {
        let kw = FixedTerminal::keyword("if");
        assert!(match_at(&kw, "if (x)").is_some());
        assert!(match_at(&kw, "if").is_some());
        assert!(match_at(&kw, "ifx").is_none());
        assert!(match_at(&kw, "if_").is_none());
    }

    #[test]
    fn word_boundary_probe_does_not_move_cursor() {
        let kw = FixedTerminal::keyword("if");
        let buf = SourceBuffer::new("ifx");
        let mut cursor = buf.cursor();
        let mut context = ScanContext::new();
        assert!(kw.try_match(&mut context, &mut cursor).is_none());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn case_insensitive_match_keeps_source_spelling() {
        let mut kw = FixedTerminal::keyword("begin");
        let data = GrammarData::new(
            "g",
            GrammarFlags::CASE_INSENSITIVE,
            None,
            GrammarData::DEFAULT_WHITESPACE.to_vec(),
        );
        kw.initialize(&data);
        let token = match_at(&kw, "BEGIN x");
        assert_eq!(token.map(|t| t.text), Some("BEGIN".to_string()));
    }

    #[test]
    fn firsts_is_the_leading_character() {
        assert_eq!(FixedTerminal::new("==").firsts(), Some(vec!['=']));
    }

    #[test]
    fn reserved_terminal_declares_empty_firsts() {
        let reserved = FixedTerminal::keyword("while").reserved();
        assert_eq!(reserved.firsts(), Some(Vec::new()));
    }

    #[test]
    fn punctuation_is_outline_and_non_significant() {
        let rparen = FixedTerminal::punctuation(")");
        assert_eq!(rparen.info().category(), TokenCategory::Outline);
        assert!(rparen.info().flags().contains(TermFlags::NON_SIGNIFICANT));
    }
}
