//! Cursor over a sentinel-terminated source buffer.
//!
//! The cursor advances byte-by-byte. EOF is detected when the current
//! byte equals the sentinel (`0x00`) and the position has reached the
//! source length. No bounds checking is needed in the common case; the
//! sentinel guarantees termination.
//!
//! The cursor is [`Copy`]. Terminals and the scanner snapshot it by value
//! before a match attempt and restore the snapshot on no-match, which is
//! how the no-advance contract of
//! [`Terminal::try_match`](crate::Terminal::try_match) is kept cheap.

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (padding). This is guaranteed by
/// [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct SourceCursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> SourceCursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel), as must all bytes
    /// after it. This is guaranteed by `SourceBuffer` construction.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        SourceCursor {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at EOF (the sentinel byte).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe at any position: the sentinel and padding guarantee valid
    /// reads beyond the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Decode the full character at the current position.
    ///
    /// ASCII bytes (including the sentinel, which decodes to `'\0'`) are
    /// returned directly; multi-byte sequences are decoded as UTF-8.
    /// Malformed sequences decode to `U+FFFD`.
    pub fn current_char(&self) -> char {
        let b = self.current();
        if b < 0x80 {
            return b as char;
        }
        let width = Self::utf8_char_width(b) as usize;
        let start = self.pos as usize;
        let end = (start + width).min(self.source_len as usize);
        std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Extract a source substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source content and on valid
    /// UTF-8 character boundaries. This holds when `start` and `end` come
    /// from token boundary tracking, since the source was originally a
    /// valid `&str`. A violated contract yields an empty string.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        std::str::from_utf8(&self.buf[start as usize..end as usize]).unwrap_or("")
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Whether the source at the current position starts with `text`.
    #[inline]
    pub fn starts_with(&self, text: &str) -> bool {
        let start = self.pos as usize;
        let end = start + text.len();
        end <= self.source_len as usize && &self.buf[start..end] == text.as_bytes()
    }

    /// Case-insensitive (ASCII) variant of [`starts_with`](Self::starts_with).
    #[inline]
    pub fn starts_with_ignore_ascii_case(&self, text: &str) -> bool {
        let start = self.pos as usize;
        let end = start + text.len();
        end <= self.source_len as usize
            && self.buf[start..end].eq_ignore_ascii_case(text.as_bytes())
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, which is true for all standard byte
    /// classification predicates. The sentinel then terminates the loop
    /// naturally.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance to the next `\n` byte or EOF using SIMD-accelerated search.
    ///
    /// Used by comment terminals to skip comment bodies. Scans only within
    /// source content. If no newline is found, positions the cursor at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Find the next occurrence of `needle` at or after the current
    /// position, without moving the cursor.
    ///
    /// Returns the absolute byte offset of the match start, or `None` if
    /// the needle does not occur before EOF. Uses SIMD-accelerated
    /// substring search.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn find_str(&self, needle: &str) -> Option<u32> {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        memchr::memmem::find(remaining, needle.as_bytes()).map(|offset| self.pos + offset as u32)
    }
}

#[cfg(test)]
mod tests;
