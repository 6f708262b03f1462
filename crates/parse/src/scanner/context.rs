use std::mem;

use tracing::debug;

use super::config::ParserConfig;
use super::header_line::HeaderLineState;
use super::request_line::RequestLineState;
use crate::ensure;
use crate::protocol::{HeaderSpan, ParseError, Span};

/// Which scanner the context is ready for.
#[derive(Debug)]
pub(super) enum Phase {
    RequestLine,
    Headers,
    Done,
    Failed(ParseError),
}

/// The mutable state threaded through both scanners for one request.
///
/// A context records where scanning stopped, the state of each automaton, the
/// start of the token currently being scanned and every span finalized so far.
/// Feeding it a buffer that grew since the previous call resumes exactly at
/// [`ParseContext::cursor`]; bytes before the cursor are never read again.
///
/// Offsets in every [`Span`] are absolute positions in the buffer passed to the
/// scanners, so the caller must keep the consumed prefix of that buffer stable.
///
/// ```
/// use micro_http_parse::scanner::{HeaderLineStatus, ParseContext, RequestLineStatus};
///
/// let buf = b"GET /a?b=1 HTTP/1.0\r\nHost: example.com\r\n\r\n";
/// let mut context = ParseContext::new();
///
/// assert_eq!(context.parse_request_line(buf).unwrap(), RequestLineStatus::Complete);
/// assert_eq!(context.parse_header_line(buf).unwrap(), HeaderLineStatus::Header);
/// assert_eq!(context.parse_header_line(buf).unwrap(), HeaderLineStatus::End);
///
/// assert_eq!(context.uri_bytes(buf), Some(&b"/a"[..]));
/// assert_eq!(context.query_string_bytes(buf), Some(&b"b=1"[..]));
/// assert_eq!(context.headers()[0].value(buf), b"example.com");
/// ```
#[derive(Debug)]
pub struct ParseContext {
    pub(super) config: ParserConfig,
    pub(super) phase: Phase,
    pub(super) cursor: usize,
    pub(super) line_start: usize,

    pub(super) request_line_state: RequestLineState,
    pub(super) header_line_state: HeaderLineState,

    /// Start of the token being scanned, kept across incomplete returns
    pub(super) mark: usize,

    pub(super) method: Option<Span>,
    pub(super) uri: Option<Span>,
    pub(super) query_string: Option<Span>,
    pub(super) protocol: Option<Span>,

    pub(super) header_name: Option<Span>,
    pub(super) header_value: Option<Span>,
    pub(super) headers: Vec<HeaderSpan>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            phase: Phase::RequestLine,
            cursor: 0,
            line_start: 0,
            request_line_state: RequestLineState::Start,
            header_line_state: HeaderLineState::Start,
            mark: 0,
            method: None,
            uri: None,
            query_string: None,
            protocol: None,
            header_name: None,
            header_value: None,
            headers: Vec::new(),
        }
    }

    /// Returns the context to its initial state for the next request.
    ///
    /// The configuration and the capacity of the header list are kept.
    pub fn reset(&mut self) {
        let mut headers = mem::take(&mut self.headers);
        headers.clear();
        *self = Self { headers, ..Self::with_config(self.config) };
    }

    /// Drives both scanners as far as `buf` allows.
    ///
    /// Returns `Some(head_len)` once the blank line ending the header block was
    /// consumed, `None` if more bytes are needed.
    ///
    /// # Errors
    ///
    /// Returns the first error either scanner reports.
    pub fn parse_head(&mut self, buf: &[u8]) -> Result<Option<usize>, ParseError> {
        if !self.parse_request_line(buf)?.is_complete() {
            return Ok(None);
        }

        loop {
            let status = self.parse_header_line(buf)?;
            if status.is_end() {
                return Ok(Some(self.cursor));
            }
            if status.is_incomplete() {
                return Ok(None);
            }
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Position where the next scan resumes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn request_line_state(&self) -> RequestLineState {
        self.request_line_state
    }

    pub fn header_line_state(&self) -> HeaderLineState {
        self.header_line_state
    }

    /// Returns true once the request line has been fully recognized.
    pub fn is_request_line_complete(&self) -> bool {
        matches!(self.phase, Phase::Headers | Phase::Done)
    }

    /// Returns true once the blank line ending the header block was consumed.
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.phase, Phase::Failed(_))
    }

    pub fn method(&self) -> Option<Span> {
        self.method
    }

    pub fn uri(&self) -> Option<Span> {
        self.uri
    }

    /// The query string span; `None` when the target carried no query string.
    pub fn query_string(&self) -> Option<Span> {
        self.query_string
    }

    pub fn protocol(&self) -> Option<Span> {
        self.protocol
    }

    /// Headers parsed so far, in arrival order.
    pub fn headers(&self) -> &[HeaderSpan] {
        &self.headers
    }

    pub fn method_bytes<'b>(&self, buf: &'b [u8]) -> Option<&'b [u8]> {
        self.method.and_then(|span| span.get(buf))
    }

    pub fn uri_bytes<'b>(&self, buf: &'b [u8]) -> Option<&'b [u8]> {
        self.uri.and_then(|span| span.get(buf))
    }

    pub fn query_string_bytes<'b>(&self, buf: &'b [u8]) -> Option<&'b [u8]> {
        self.query_string.and_then(|span| span.get(buf))
    }

    pub fn protocol_bytes<'b>(&self, buf: &'b [u8]) -> Option<&'b [u8]> {
        self.protocol.and_then(|span| span.get(buf))
    }

    /// Checks that the head was scanned to its end, replaying the stored error of a failed context.
    pub(crate) fn ensure_complete(&self) -> Result<(), ParseError> {
        match &self.phase {
            Phase::Done => Ok(()),
            Phase::Failed(e) => Err(e.replay()),
            Phase::RequestLine | Phase::Headers => Err(ParseError::Incomplete),
        }
    }

    pub(crate) fn take_headers(&mut self) -> Vec<HeaderSpan> {
        mem::take(&mut self.headers)
    }

    /// The part of `buf` that has not been scanned yet.
    pub(super) fn unscanned<'b>(&self, buf: &'b [u8]) -> Result<&'b [u8], ParseError> {
        buf.get(self.cursor..).ok_or_else(|| ParseError::cursor_out_of_bounds(self.cursor, buf.len()))
    }

    /// Checks that consuming the byte at the cursor stays within the limits.
    pub(super) fn check_limits(&self) -> Result<(), ParseError> {
        let line_size = self.cursor - self.line_start + 1;
        let max_line_bytes = self.config.max_line_bytes();
        ensure!(line_size <= max_line_bytes, ParseError::too_large_line(line_size, max_line_bytes));

        let head_size = self.cursor + 1;
        let max_head_bytes = self.config.max_head_bytes();
        ensure!(head_size <= max_head_bytes, ParseError::too_large_header(head_size, max_head_bytes));

        Ok(())
    }

    /// Poisons the context if `result` is an error.
    pub(super) fn settle<T>(&mut self, result: Result<T, ParseError>) -> Result<T, ParseError> {
        if let Err(e) = &result {
            debug!(cursor = self.cursor, cause = %e, "failed to parse request head");
            self.phase = Phase::Failed(e.replay());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{HeaderLineStatus, RequestLineStatus};

    #[test]
    fn new_context_is_at_start() {
        let context = ParseContext::new();

        assert_eq!(context.cursor(), 0);
        assert_eq!(context.request_line_state(), RequestLineState::Start);
        assert_eq!(context.header_line_state(), HeaderLineState::Start);
        assert!(!context.is_request_line_complete());
        assert!(!context.is_complete());
        assert!(!context.is_failed());
        assert_eq!(context.method(), None);
        assert_eq!(context.query_string(), None);
        assert!(context.headers().is_empty());
    }

    #[test]
    fn parse_head_in_one_go() {
        let buf = b"GET / HTTP/1.1\r\nHost: a\r\nAccept: */*\r\n\r\nbody";
        let mut context = ParseContext::new();

        assert_eq!(context.parse_head(buf).unwrap(), Some(buf.len() - 4));
        assert!(context.is_complete());
        assert_eq!(context.headers().len(), 2);
    }

    #[test]
    fn parse_head_needs_more() {
        let buf = b"GET / HTTP/1.1\r\nHost: a\r\n";
        let mut context = ParseContext::new();

        assert_eq!(context.parse_head(buf).unwrap(), None);
        assert!(context.is_request_line_complete());
        assert!(!context.is_complete());
        assert_eq!(context.headers().len(), 1);
    }

    #[test]
    fn reset_keeps_config() {
        let config = ParserConfig::default().with_max_headers(2);
        let buf = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";
        let mut context = ParseContext::with_config(config);
        context.parse_head(buf).unwrap();

        context.reset();

        assert_eq!(context.config(), &config);
        assert_eq!(context.cursor(), 0);
        assert!(!context.is_request_line_complete());
        assert_eq!(context.method(), None);
        assert!(context.headers().is_empty());
    }

    #[test]
    fn reset_clears_failure() {
        let mut context = ParseContext::new();
        assert!(context.parse_request_line(b"get").is_err());
        assert!(context.is_failed());

        context.reset();

        assert!(!context.is_failed());
        assert_eq!(context.parse_request_line(b"GET / HTTP/1.1\r\n").unwrap(), RequestLineStatus::Complete);
    }

    #[test]
    fn shrunk_buffer_is_rejected() {
        let mut context = ParseContext::new();
        assert_eq!(context.parse_request_line(b"GET /inde").unwrap(), RequestLineStatus::Incomplete);

        let result = context.parse_request_line(b"GET");
        assert!(matches!(result, Err(ParseError::CursorOutOfBounds { cursor: 9, len: 3 })));
    }

    #[test]
    fn head_limit() {
        let config = ParserConfig::default().with_max_head_bytes(32);
        let buf = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let mut context = ParseContext::with_config(config);

        assert_eq!(context.parse_request_line(buf).unwrap(), RequestLineStatus::Complete);
        let result = context.parse_header_line(buf);
        assert!(matches!(result, Err(ParseError::TooLargeHeader { current_size: 33, max_size: 32 })));
        assert_eq!(context.cursor(), 32);
    }

    #[test]
    fn header_scan_before_request_line() {
        let mut context = ParseContext::new();
        let result = context.parse_header_line(b"Host: a\r\n");

        assert!(matches!(result, Err(ParseError::OutOfOrder)));
        assert!(!context.is_failed());
        assert_eq!(context.cursor(), 0);
        assert_eq!(context.parse_head(b"GET / HTTP/1.1\r\n\r\n").unwrap(), Some(18));
        assert_eq!(context.parse_header_line(b"GET / HTTP/1.1\r\n\r\n").unwrap(), HeaderLineStatus::End);
    }

    #[test]
    fn ensure_complete_follows_the_phase() {
        let buf = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";
        let mut context = ParseContext::new();
        assert!(matches!(context.ensure_complete(), Err(ParseError::Incomplete)));

        context.parse_request_line(&buf[..8]).unwrap();
        assert!(matches!(context.ensure_complete(), Err(ParseError::Incomplete)));

        context.parse_head(&buf[..buf.len() - 1]).unwrap();
        assert!(context.is_request_line_complete());
        assert!(matches!(context.ensure_complete(), Err(ParseError::Incomplete)));

        context.parse_head(buf).unwrap();
        assert!(context.ensure_complete().is_ok());

        let mut context = ParseContext::new();
        assert!(context.parse_head(b"GET / HTTP/1.1\r\nX:bad\r\n").is_err());
        assert!(matches!(context.ensure_complete(), Err(ParseError::InvalidHeader { .. })));
    }
}
