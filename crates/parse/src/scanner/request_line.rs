//! Scanner for the request line: `METHOD SP "/"[PATH]["?"QUERY] SP "HTTP/1." DIGIT CR LF`.
//!
//! The automaton is a plain enum with a pure transition function,
//! [`RequestLineState::next`]. [`ParseContext::parse_request_line`] feeds it
//! the unscanned bytes one at a time and applies the returned
//! [`RequestLineAction`] at the current offset. The state lives in the context,
//! so a request line split across any number of reads resumes where it stopped.

use tracing::trace;

use super::context::{ParseContext, Phase};
use super::status::RequestLineStatus;
use crate::protocol::{ParseError, Span};
use RequestLineState::*;

/// States of the request line automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestLineState {
    /// Skip stray CR/LF, expect the first method letter
    #[default]
    Start,
    /// Read uppercase method letters until SP
    Method,
    /// Expect the leading `/` of the target
    SpaceBeforeUri,
    /// Read the first byte after the leading `/`
    AfterSlashInUri,
    /// Read path bytes until SP or `?`
    Uri,
    /// Read the first byte after `?`
    QuestionMarkBeforeQueryString,
    /// Read query bytes until SP
    QueryString,
    /// Expect `H`
    SpaceBeforeVersion,
    /// Expect the first `T`
    HttpH,
    /// Expect the second `T`
    HttpHt,
    /// Expect `P`
    HttpHtt,
    /// Expect `/`
    HttpHttp,
    /// Expect the major digit `1`
    SlashBeforeVersion,
    /// Expect `.`
    VersionMajorDigit,
    /// Expect the minor digit `0` or `1`
    VersionDot,
    /// Expect CR
    VersionMinorDigit,
    /// Expect LF
    AlmostDone,
}

/// Effect of a transition, applied by the context at the offset of the byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLineAction {
    /// Nothing to record
    Consume,
    /// The byte starts a token
    Mark,
    /// The byte ends the method
    Method,
    /// The byte ends the target path; without a `?` the query string is absent
    Uri { has_query: bool },
    /// The byte ends the query string
    QueryString,
    /// `?` was directly followed by SP
    NoQueryString,
    /// The byte ends the protocol
    Protocol,
    /// The line terminator was consumed
    Done,
}

impl RequestLineState {
    /// Computes the transition for `byte`.
    ///
    /// # Errors
    ///
    /// Returns the grammar error for the production `byte` violates.
    pub fn next(self, byte: u8) -> Result<(RequestLineState, RequestLineAction), ParseError> {
        use RequestLineAction as A;

        let transition = match (self, byte) {
            (Start, b'\r' | b'\n') => (Start, A::Consume),
            (Start, b'A'..=b'Z') => (Method, A::Mark),
            (Start, _) => return Err(ParseError::InvalidMethod),

            (Method, b'A'..=b'Z') => (Method, A::Consume),
            (Method, b' ') => (SpaceBeforeUri, A::Method),
            (Method, _) => return Err(ParseError::InvalidMethod),

            (SpaceBeforeUri, b'/') => (AfterSlashInUri, A::Mark),
            (SpaceBeforeUri, _) => return Err(ParseError::InvalidRequestTarget),

            (AfterSlashInUri | Uri, b' ') => (SpaceBeforeVersion, A::Uri { has_query: false }),
            (AfterSlashInUri | Uri, b'?') => (QuestionMarkBeforeQueryString, A::Uri { has_query: true }),
            (AfterSlashInUri | Uri, _) => (Uri, A::Consume),

            // "/path? HTTP/1.1" carries no query string at all
            (QuestionMarkBeforeQueryString, b' ') => (SpaceBeforeVersion, A::NoQueryString),
            (QuestionMarkBeforeQueryString, _) => (QueryString, A::Mark),

            (QueryString, b' ') => (SpaceBeforeVersion, A::QueryString),
            (QueryString, _) => (QueryString, A::Consume),

            (SpaceBeforeVersion, b'H') => (HttpH, A::Mark),
            (HttpH, b'T') => (HttpHt, A::Consume),
            (HttpHt, b'T') => (HttpHtt, A::Consume),
            (HttpHtt, b'P') => (HttpHttp, A::Consume),
            (HttpHttp, b'/') => (SlashBeforeVersion, A::Consume),
            (SlashBeforeVersion, b'1') => (VersionMajorDigit, A::Consume),
            (VersionMajorDigit, b'.') => (VersionDot, A::Consume),
            (VersionDot, b'0' | b'1') => (VersionMinorDigit, A::Consume),
            (VersionMinorDigit, b'\r') => (AlmostDone, A::Protocol),
            (AlmostDone, b'\n') => (Start, A::Done),

            (
                SpaceBeforeVersion | HttpH | HttpHt | HttpHtt | HttpHttp | SlashBeforeVersion | VersionMajorDigit | VersionDot
                | VersionMinorDigit | AlmostDone,
                _,
            ) => return Err(ParseError::InvalidVersion),
        };

        Ok(transition)
    }
}

impl ParseContext {
    /// Scans the request line from the cursor onward.
    ///
    /// `buf` is the whole buffer of the request, possibly grown since the last
    /// call; scanning resumes at [`ParseContext::cursor`].
    ///
    /// Once the line is complete, further calls return
    /// [`RequestLineStatus::Complete`] without reading anything.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidMethod`], [`ParseError::InvalidRequestTarget`] or
    ///   [`ParseError::InvalidVersion`] on a grammar violation
    /// - [`ParseError::TooLargeLine`] or [`ParseError::TooLargeHeader`] when a limit is hit
    /// - [`ParseError::CursorOutOfBounds`] if `buf` is shorter than what was consumed
    ///
    /// Any error poisons the context: later calls return the same error.
    pub fn parse_request_line(&mut self, buf: &[u8]) -> Result<RequestLineStatus, ParseError> {
        match &self.phase {
            Phase::RequestLine => {}
            Phase::Headers | Phase::Done => return Ok(RequestLineStatus::Complete),
            Phase::Failed(e) => return Err(e.replay()),
        }

        let result = self.scan_request_line(buf);
        self.settle(result)
    }

    fn scan_request_line(&mut self, buf: &[u8]) -> Result<RequestLineStatus, ParseError> {
        for &byte in self.unscanned(buf)? {
            self.check_limits()?;

            let (state, action) = self.request_line_state.next(byte)?;
            let pos = self.cursor;

            self.request_line_state = state;
            self.cursor += 1;

            match action {
                RequestLineAction::Consume => {}
                RequestLineAction::Mark => self.mark = pos,
                RequestLineAction::Method => self.method = Some(Span::between(self.mark, pos)),
                RequestLineAction::Uri { has_query } => {
                    self.uri = Some(Span::between(self.mark, pos));
                    if !has_query {
                        self.query_string = None;
                    }
                }
                RequestLineAction::QueryString => self.query_string = Some(Span::between(self.mark, pos)),
                RequestLineAction::NoQueryString => self.query_string = None,
                RequestLineAction::Protocol => self.protocol = Some(Span::between(self.mark, pos)),
                RequestLineAction::Done => {
                    self.phase = Phase::Headers;
                    self.line_start = self.cursor;
                    trace!(
                        line_size = self.cursor,
                        has_query = self.query_string.is_some(),
                        "parsed request line"
                    );
                    return Ok(RequestLineStatus::Complete);
                }
            }
        }

        Ok(RequestLineStatus::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ParserConfig;

    fn parse(buf: &[u8]) -> (ParseContext, Result<RequestLineStatus, ParseError>) {
        let mut context = ParseContext::new();
        let result = context.parse_request_line(buf);
        (context, result)
    }

    #[test]
    fn root_without_query() {
        let buf = b"GET / HTTP/1.1\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.method_bytes(buf), Some(&b"GET"[..]));
        assert_eq!(context.uri_bytes(buf), Some(&b"/"[..]));
        assert_eq!(context.query_string(), None);
        assert_eq!(context.protocol_bytes(buf), Some(&b"HTTP/1.1"[..]));
        assert_eq!(context.cursor(), buf.len());
        assert_eq!(context.request_line_state(), Start);
    }

    #[test]
    fn path_with_query() {
        let buf = b"GET /a?b=1 HTTP/1.0\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.uri_bytes(buf), Some(&b"/a"[..]));
        assert_eq!(context.query_string_bytes(buf), Some(&b"b=1"[..]));
        assert_eq!(context.protocol_bytes(buf), Some(&b"HTTP/1.0"[..]));
    }

    #[test]
    fn query_right_after_slash() {
        let buf = b"POST /?x HTTP/1.1\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.method_bytes(buf), Some(&b"POST"[..]));
        assert_eq!(context.uri_bytes(buf), Some(&b"/"[..]));
        assert_eq!(context.query_string_bytes(buf), Some(&b"x"[..]));
    }

    #[test]
    fn empty_query_is_absent() {
        let buf = b"GET /search? HTTP/1.1\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.uri_bytes(buf), Some(&b"/search"[..]));
        assert_eq!(context.query_string(), None);
    }

    #[test]
    fn second_question_mark_belongs_to_query() {
        let buf = b"GET /a?b?c HTTP/1.1\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.query_string_bytes(buf), Some(&b"b?c"[..]));
    }

    #[test]
    fn leading_line_breaks_are_skipped() {
        let buf = b"\r\n\r\nDELETE /item/1 HTTP/1.1\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.method(), Some(Span::new(4, 6)));
        assert_eq!(context.uri_bytes(buf), Some(&b"/item/1"[..]));
    }

    #[test]
    fn lowercase_method() {
        let (context, result) = parse(b"get / HTTP/1.1\r\n");

        assert!(matches!(result, Err(ParseError::InvalidMethod)));
        assert!(context.is_failed());
        assert_eq!(context.cursor(), 0);
    }

    #[test]
    fn method_with_digit() {
        let (context, result) = parse(b"G3T / HTTP/1.1\r\n");

        assert!(matches!(result, Err(ParseError::InvalidMethod)));
        assert_eq!(context.cursor(), 1);
    }

    #[test]
    fn target_without_slash() {
        let (_, result) = parse(b"GET http://a/ HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestTarget)));

        let (_, result) = parse(b"GET  / HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestTarget)));
    }

    #[test]
    fn unsupported_versions() {
        for line in [
            &b"GET /x HTTP/2.0\r\n"[..],
            b"GET /x HTTP/1.2\r\n",
            b"GET /x HTTP/1.10\r\n",
            b"GET /x http/1.1\r\n",
            b"GET /x HTTP/1.1\n",
            b"GET /x HTTP/1.1\r\r",
            b"GET /x  HTTP/1.1\r\n",
        ] {
            let (_, result) = parse(line);
            assert!(matches!(result, Err(ParseError::InvalidVersion)), "{:?}", String::from_utf8_lossy(line));
        }
    }

    #[test]
    fn incomplete_keeps_partial_token() {
        let mut context = ParseContext::new();

        assert_eq!(context.parse_request_line(b"GET /ind").unwrap(), RequestLineStatus::Incomplete);
        assert_eq!(context.request_line_state(), Uri);
        assert_eq!(context.cursor(), 8);
        assert_eq!(context.method(), Some(Span::new(0, 3)));
        assert_eq!(context.uri(), None);

        let buf = b"GET /index.html HTTP/1.1\r\n";
        assert_eq!(context.parse_request_line(buf).unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.uri_bytes(buf), Some(&b"/index.html"[..]));
    }

    #[test]
    fn complete_is_idempotent() {
        let buf = b"GET /a?b HTTP/1.1\r\nHost: x\r\n";
        let mut context = ParseContext::new();
        assert_eq!(context.parse_request_line(buf).unwrap(), RequestLineStatus::Complete);
        let (cursor, method, uri, query, protocol) =
            (context.cursor(), context.method(), context.uri(), context.query_string(), context.protocol());

        assert_eq!(context.parse_request_line(buf).unwrap(), RequestLineStatus::Complete);

        assert_eq!(context.cursor(), cursor);
        assert_eq!(context.method(), method);
        assert_eq!(context.uri(), uri);
        assert_eq!(context.query_string(), query);
        assert_eq!(context.protocol(), protocol);
    }

    #[test]
    fn error_is_terminal() {
        let mut context = ParseContext::new();
        assert!(matches!(context.parse_request_line(b"GET / HTTP/2"), Err(ParseError::InvalidVersion)));
        let cursor = context.cursor();

        assert!(matches!(context.parse_request_line(b"GET / HTTP/2.0\r\n"), Err(ParseError::InvalidVersion)));
        assert_eq!(context.cursor(), cursor);
        assert_eq!(context.protocol(), None);
    }

    #[test]
    fn zero_byte_in_target_is_kept() {
        let buf = b"GET /a\0b HTTP/1.1\r\n";
        let (context, result) = parse(buf);

        assert_eq!(result.unwrap(), RequestLineStatus::Complete);
        assert_eq!(context.uri_bytes(buf), Some(&b"/a\0b"[..]));
    }

    #[test]
    fn line_limit() {
        let config = ParserConfig::default().with_max_line_bytes(16);
        let mut context = ParseContext::with_config(config);

        let buf = b"GET /0123456789abcdef HTTP/1.1\r\n";
        let result = context.parse_request_line(buf);

        assert!(matches!(result, Err(ParseError::TooLargeLine { current_size: 17, max_size: 16 })));
        assert_eq!(context.cursor(), 16);
    }

    #[test]
    fn transition_table() {
        use RequestLineAction as A;

        assert_eq!(Start.next(b'\n').unwrap(), (Start, A::Consume));
        assert_eq!(Start.next(b'P').unwrap(), (Method, A::Mark));
        assert_eq!(Method.next(b' ').unwrap(), (SpaceBeforeUri, A::Method));
        assert_eq!(SpaceBeforeUri.next(b'/').unwrap(), (AfterSlashInUri, A::Mark));
        assert_eq!(AfterSlashInUri.next(b' ').unwrap(), (SpaceBeforeVersion, A::Uri { has_query: false }));
        assert_eq!(AfterSlashInUri.next(b'a').unwrap(), (Uri, A::Consume));
        assert_eq!(Uri.next(b'?').unwrap(), (QuestionMarkBeforeQueryString, A::Uri { has_query: true }));
        assert_eq!(QuestionMarkBeforeQueryString.next(b' ').unwrap(), (SpaceBeforeVersion, A::NoQueryString));
        assert_eq!(QuestionMarkBeforeQueryString.next(b'q').unwrap(), (QueryString, A::Mark));
        assert_eq!(QueryString.next(b' ').unwrap(), (SpaceBeforeVersion, A::QueryString));
        assert_eq!(SpaceBeforeVersion.next(b'H').unwrap(), (HttpH, A::Mark));
        assert_eq!(VersionDot.next(b'0').unwrap(), (VersionMinorDigit, A::Consume));
        assert_eq!(VersionMinorDigit.next(b'\r').unwrap(), (AlmostDone, A::Protocol));
        assert_eq!(AlmostDone.next(b'\n').unwrap(), (Start, A::Done));

        assert!(matches!(VersionDot.next(b'2'), Err(ParseError::InvalidVersion)));
        assert!(matches!(SlashBeforeVersion.next(b'2'), Err(ParseError::InvalidVersion)));
        assert!(matches!(Method.next(b'\r'), Err(ParseError::InvalidMethod)));
    }
}
