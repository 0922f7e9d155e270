//! Numeric literal terminal.
//!
//! Recognizes decimal, hex (`0x`), and binary (`0b`) integers plus
//! floats with optional exponent, all with `_` digit separators. Values
//! are parsed with checked arithmetic; overflow is a no-match, never a
//! panic.

use tessera_core::{
    ScanContext, SourceCursor, Span, TermInfo, Terminal, Token, TokenValue,
};

/// Parse an integer, skipping underscores, without allocation.
#[inline]
fn parse_int_skip_underscores(s: &str, radix: u32) -> Option<u64> {
    let mut result: u64 = 0;
    let mut any_digit = false;
    for c in s.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix)?;
        result = result.checked_mul(u64::from(radix))?;
        result = result.checked_add(u64::from(digit))?;
        any_digit = true;
    }
    any_digit.then_some(result)
}

/// Parse a float, allocating only when underscores are present.
#[inline]
fn parse_float_skip_underscores(s: &str) -> Option<f64> {
    if s.contains('_') {
        s.replace('_', "").parse().ok()
    } else {
        s.parse().ok()
    }
}

/// Matches numeric literals.
pub struct NumberTerminal {
    info: TermInfo,
}

impl NumberTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        NumberTerminal {
            info: TermInfo::new(name),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.info.set_priority(priority);
        self
    }

    /// Scan a radix-prefixed integer (`0x...`, `0b...`) on `probe`.
    /// Returns the parsed value, or `None` when no valid digit follows
    /// the prefix (the caller falls back to a decimal parse of `0`).
    fn scan_radix(probe: &mut SourceCursor<'_>, radix: u32) -> Option<u64> {
        let mut digits = *probe;
        digits.advance_n(2);
        let digits_start = digits.pos();
        digits.eat_while(|b| char::from(b).is_digit(radix) || b == b'_');
        let value = parse_int_skip_underscores(digits.slice_from(digits_start), radix)?;
        *probe = digits;
        Some(value)
    }
}

impl Terminal for NumberTerminal {
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
        if !cursor.current().is_ascii_digit() {
            return None;
        }
        let start = cursor.pos();
        let mut probe = *cursor;

        let value = if probe.current() == b'0' && matches!(probe.peek(), b'x' | b'b') {
            let radix = if probe.peek() == b'x' { 16 } else { 2 };
            Self::scan_radix(&mut probe, radix).map(TokenValue::Int)
        } else {
            None
        };

        let value = match value {
            Some(v) => v,
            None => {
                // Decimal integer or float.
                probe.eat_while(|b| b.is_ascii_digit() || b == b'_');
                let mut is_float = false;
                if probe.current() == b'.' && probe.peek().is_ascii_digit() {
                    is_float = true;
                    probe.advance();
                    probe.eat_while(|b| b.is_ascii_digit() || b == b'_');
                }
                if matches!(probe.current(), b'e' | b'E') {
                    // Only consume the exponent when digits follow it.
                    let mut exponent = probe;
                    exponent.advance();
                    if matches!(exponent.current(), b'+' | b'-') {
                        exponent.advance();
                    }
                    if exponent.current().is_ascii_digit() {
                        exponent.eat_while(|b| b.is_ascii_digit());
                        probe = exponent;
                        is_float = true;
                    }
                }
                let text = probe.slice_from(start);
                if is_float {
                    TokenValue::Float(parse_float_skip_underscores(text)?)
                } else {
                    TokenValue::Int(parse_int_skip_underscores(text, 10)?)
                }
            }
        };

        *cursor = probe;
        let text = cursor.slice_from(start);
        Some(Token::new(
            self.info.id(),
            Span::new(start, cursor.pos()),
            text,
            value,
            self.info.category(),
        ))
    }

    fn firsts(&self) -> Option<Vec<char>> {
        Some(('0'..='9').collect())
    }
}
