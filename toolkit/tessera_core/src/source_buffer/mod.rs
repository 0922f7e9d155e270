//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing terminals to detect EOF without explicit bounds checking. The
//! total buffer size is rounded up to the next 64-byte boundary, which
//! also provides safe padding for `peek()` and `peek2()` operations near
//! the end of the buffer.

use std::fmt;

use crate::SourceCursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Error when the source exceeds the `u32` position space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTooLarge {
    /// Actual byte length of the offending source.
    pub len: usize,
}

impl fmt::Display for SourceTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source is {} bytes, exceeding the u32 position space ({} bytes)",
            self.len,
            u32::MAX
        )
    }
}

impl std::error::Error for SourceTooLarge {}

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`. All subsequent
/// bytes (padding) are also `0x00`, ensuring safe reads for `peek()` and
/// `peek2()` near the end of the buffer.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a buffer over `source`.
    ///
    /// Returns [`SourceTooLarge`] when the source exceeds `u32::MAX` bytes;
    /// spans and cursor positions are 32-bit.
    pub fn try_new(source: &str) -> Result<Self, SourceTooLarge> {
        let source_len =
            u32::try_from(source.len()).map_err(|_| SourceTooLarge { len: source.len() })?;
        // +1 for the sentinel, then round up to the next cache line.
        let padded_len = (source.len() + 1).div_ceil(CACHE_LINE) * CACHE_LINE;
        let mut buf = vec![0u8; padded_len];
        buf[..source.len()].copy_from_slice(source.as_bytes());
        Ok(SourceBuffer { buf, source_len })
    }

    /// Create a buffer over `source`.
    ///
    /// # Panics
    ///
    /// Panics if the source exceeds `u32::MAX` bytes. Use
    /// [`try_new`](Self::try_new) for fallible construction.
    pub fn new(source: &str) -> Self {
        Self::try_new(source).unwrap_or_else(|e| panic!("{e}"))
    }

    /// A cursor positioned at the start of the source.
    pub fn cursor(&self) -> SourceCursor<'_> {
        SourceCursor::new(&self.buf, self.source_len)
    }

    /// Byte length of the source content.
    #[inline]
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Whether the source is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// The source content as text.
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.source_len as usize]).unwrap_or("")
    }
}
