//! Comment and delimited-run terminals.

use tessera_core::{
    ScanContext, SourceCursor, Span, TermFlags, TermInfo, Terminal, Token, TokenCategory,
    TokenValue,
};

/// Matches a prefix through the end of the line.
///
/// The body skip is SIMD-accelerated (memchr under the cursor). The
/// terminating newline is not part of the token.
pub struct LineCommentTerminal {
    info: TermInfo,
    prefix: String,
}

impl LineCommentTerminal {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        let mut info = TermInfo::with_category(name, TokenCategory::Comment);
        info.insert_flags(TermFlags::NON_SIGNIFICANT | TermFlags::NON_GRAMMAR);
        LineCommentTerminal {
            info,
            prefix: prefix.into(),
        }
    }
}

impl Terminal for LineCommentTerminal {
    fn info(&self) -> &TermInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TermInfo {
        &mut self.info
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "comment prefix length always fits in u32"
    )]
    fn try_match(
        &self,
        _context: &mut ScanContext,
        cursor: &mut SourceCursor<'_>,
    ) -> Option<Token> {
        if !cursor.starts_with(&self.prefix) {
            return None;
        }
        let start = cursor.pos();
        cursor.advance_n(self.prefix.len() as u32);
        cursor.eat_until_newline_or_eof();
        let text = cursor.slice_from(start);
        Some(Token::new(
            self.info.id(),
            Span::new(start, cursor.pos()),
            text,
            TokenValue::None,
            self.info.category(),
        ))
    }

    fn firsts(&self) -> Option<Vec<char>> {
        self.prefix.chars().next().map(|c| vec![c])
    }
}

/// Matches an open/close delimited run: block comments, quoted strings.
///
/// Unterminated input is a no-match; the cursor stays put and lower
/// priority candidates (or the error token path) take over. The close
/// delimiter search is SIMD-accelerated substring search.
pub struct DelimitedTerminal {
    info: TermInfo,
    open: String,
    close: String,
    /// Capture the text between the delimiters as the token value.
    capture_content: bool,
}

impl DelimitedTerminal {
    /// Content-category delimited terminal (quoted strings).
    pub fn new(
        name: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        DelimitedTerminal {
            info: TermInfo::new(name),
            open: open.into(),
            close: close.into(),
            capture_content: false,
        }
    }

    /// Comment-category delimited terminal (block comments);
    /// non-significant.
    pub fn comment(
        name: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        let mut terminal = Self::new(name, open, close);
        terminal.info = TermInfo::with_category(terminal.info.name().to_string(), TokenCategory::Comment);
        terminal
            .info
            .insert_flags(TermFlags::NON_SIGNIFICANT | TermFlags::NON_GRAMMAR);
        terminal
    }

    /// Capture the text between the delimiters as
    /// [`TokenValue::Str`].
    #[must_use]
    pub fn with_captured_content(mut self) -> Self {
        self.capture_content = true;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.info.set_priority(priority);
        self
    }
}

impl Terminal for DelimitedTerminal {
    fn info(&self) -> &TermInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut TermInfo {
        &mut self.info
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "delimiter lengths always fit in u32"
    )]
    fn try_match(
        &self,
        _context: &mut ScanContext,
        cursor: &mut SourceCursor<'_>,
    ) -> Option<Token> {
        if !cursor.starts_with(&self.open) {
            return None;
        }
        let start = cursor.pos();
        let mut probe = *cursor;
        probe.advance_n(self.open.len() as u32);

        // Unterminated run: no-match, the cursor stays at `start`.
        let close_start = probe.find_str(&self.close)?;
        let end = close_start + self.close.len() as u32;

        let value = if self.capture_content {
            TokenValue::Str(probe.slice(probe.pos(), close_start).to_string())
        } else {
            TokenValue::None
        };

        *cursor = probe;
        cursor.advance_n(end - cursor.pos());
        let text = cursor.slice(start, end);
        Some(Token::new(
            self.info.id(),
            Span::new(start, end),
            text,
            value,
            self.info.category(),
        ))
    }

    fn firsts(&self) -> Option<Vec<char>> {
        self.open.chars().next().map(|c| vec![c])
    }
}
