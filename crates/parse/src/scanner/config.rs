/// Default maximum number of headers allowed in a request
pub const MAX_HEADER_NUM: usize = 64;

/// Default maximum size in bytes of a single line, terminator included
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Default maximum size in bytes of the whole request head
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

/// Limits applied by a [`ParseContext`](super::ParseContext).
///
/// ```
/// use micro_http_parse::scanner::ParserConfig;
///
/// let config = ParserConfig::default().with_max_headers(16).with_max_line_bytes(1024);
/// assert_eq!(config.max_headers(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    max_headers: usize,
    max_line_bytes: usize,
    max_head_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_headers: MAX_HEADER_NUM, max_line_bytes: MAX_LINE_BYTES, max_head_bytes: MAX_HEAD_BYTES }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    #[must_use]
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    #[must_use]
    pub fn with_max_head_bytes(mut self, max_head_bytes: usize) -> Self {
        self.max_head_bytes = max_head_bytes;
        self
    }

    pub fn max_headers(&self) -> usize {
        self.max_headers
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    pub fn max_head_bytes(&self) -> usize {
        self.max_head_bytes
    }
}
