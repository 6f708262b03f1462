//! Zero-copy references into the scanned buffer.

use std::ops::Range;

/// An `(offset, length)` reference into the buffer handed to the scanners.
///
/// A span never owns or copies bytes. It stays meaningful as long as the buffer
/// bytes it covers are left untouched, which the scanners require for every
/// position before the cursor anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    len: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Builds the span covering `start..end`.
    #[inline]
    pub(crate) const fn between(start: usize, end: usize) -> Self {
        Self { start, len: end - start }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns the bytes this span covers in `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than [`Span::end`], i.e. it is not the buffer
    /// (or a prefix-preserving extension of the buffer) the span was taken from.
    #[inline]
    pub fn slice<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        &buf[self.range()]
    }

    /// Non-panicking form of [`Span::slice`].
    #[inline]
    pub fn get<'b>(&self, buf: &'b [u8]) -> Option<&'b [u8]> {
        buf.get(self.range())
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}

/// One parsed header line: the name and value spans, both finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
    /// Span of the header name, never containing `:`
    pub name: Span,
    /// Span of the header value, never containing the line terminator
    pub value: Span,
}

impl HeaderSpan {
    pub const fn new(name: Span, value: Span) -> Self {
        Self { name, value }
    }

    pub fn name<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        self.name.slice(buf)
    }

    pub fn value<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        self.value.slice(buf)
    }
}
