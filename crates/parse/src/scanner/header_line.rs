//! Scanner for one header line, `NAME ":" SP VALUE CR LF`, or the blank line ending the block.
//!
//! Like the request line automaton, the state is kept in the [`ParseContext`],
//! so a header line split across reads resumes where it stopped.

use tracing::trace;

use super::context::{ParseContext, Phase};
use super::status::HeaderLineStatus;
use crate::ensure;
use crate::protocol::{HeaderSpan, ParseError, Span};
use HeaderLineState::*;

/// States of the header line automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderLineState {
    /// First byte of a line: CR starts the blank line, anything else a name
    #[default]
    Start,
    /// Read name bytes until `:`
    Name,
    /// Expect exactly one SP
    ColonAfterName,
    /// The byte here is the first byte of the value
    SpaceBeforeValue,
    /// Read value bytes until CR
    Value,
    /// Expect LF ending a header line
    AlmostDone,
    /// Expect LF ending the header block
    HeadersAlmostDone,
}

/// Effect of a transition, applied by the context at the offset of the byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLineAction {
    /// Nothing to record
    Consume,
    /// The byte starts the name or the value
    Mark,
    /// The byte ends the name
    Name,
    /// The byte ends the value
    Value,
    /// The value is empty and this byte is its terminating CR
    EmptyValue,
    /// The header line is complete
    Header,
    /// The header block is complete
    End,
}

impl HeaderLineState {
    /// Computes the transition for `byte`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeader`] when `byte` violates the header line grammar.
    pub fn next(self, byte: u8) -> Result<(HeaderLineState, HeaderLineAction), ParseError> {
        use HeaderLineAction as A;

        let transition = match (self, byte) {
            (Start, b'\r') => (HeadersAlmostDone, A::Consume),
            (Start, b':') => return Err(ParseError::invalid_header("empty header name")),
            (Start | Name, b'\n') => return Err(ParseError::invalid_header("line break in header name")),
            (Start, _) => (Name, A::Mark),

            (Name, b':') => (ColonAfterName, A::Name),
            (Name, b'\r') => return Err(ParseError::invalid_header("line break in header name")),
            (Name, _) => (Name, A::Consume),

            (ColonAfterName, b' ') => (SpaceBeforeValue, A::Consume),
            (ColonAfterName, _) => return Err(ParseError::invalid_header("expect a single space after colon")),

            (SpaceBeforeValue, b'\r') => (AlmostDone, A::EmptyValue),
            (SpaceBeforeValue, _) => (Value, A::Mark),

            (Value, b'\r') => (AlmostDone, A::Value),
            (Value, _) => (Value, A::Consume),

            (AlmostDone, b'\n') => (Start, A::Header),
            (AlmostDone, _) => return Err(ParseError::invalid_header("expect LF after header value")),

            (HeadersAlmostDone, b'\n') => (Start, A::End),
            (HeadersAlmostDone, _) => return Err(ParseError::invalid_header("expect LF after header block")),
        };

        Ok(transition)
    }
}

impl ParseContext {
    /// Scans one header line from the cursor onward.
    ///
    /// Must be called after [`ParseContext::parse_request_line`] completed. Once
    /// the blank line was consumed, further calls return [`HeaderLineStatus::End`]
    /// without reading anything.
    ///
    /// # Errors
    ///
    /// - [`ParseError::OutOfOrder`] if the request line is not complete yet; the
    ///   context is left untouched
    /// - [`ParseError::InvalidHeader`] on a grammar violation
    /// - [`ParseError::TooManyHeaders`], [`ParseError::TooLargeLine`] or
    ///   [`ParseError::TooLargeHeader`] when a limit is hit
    /// - [`ParseError::CursorOutOfBounds`] if `buf` is shorter than what was consumed
    ///
    /// Every error but [`ParseError::OutOfOrder`] poisons the context.
    pub fn parse_header_line(&mut self, buf: &[u8]) -> Result<HeaderLineStatus, ParseError> {
        match &self.phase {
            Phase::Headers => {}
            Phase::RequestLine => return Err(ParseError::OutOfOrder),
            Phase::Done => return Ok(HeaderLineStatus::End),
            Phase::Failed(e) => return Err(e.replay()),
        }

        let result = self.scan_header_line(buf);
        self.settle(result)
    }

    fn scan_header_line(&mut self, buf: &[u8]) -> Result<HeaderLineStatus, ParseError> {
        for &byte in self.unscanned(buf)? {
            self.check_limits()?;

            let (state, action) = self.header_line_state.next(byte)?;
            let pos = self.cursor;

            match action {
                HeaderLineAction::Consume => {}
                HeaderLineAction::Mark => self.mark = pos,
                HeaderLineAction::Name => self.header_name = Some(Span::between(self.mark, pos)),
                HeaderLineAction::Value => self.header_value = Some(Span::between(self.mark, pos)),
                HeaderLineAction::EmptyValue => self.header_value = Some(Span::new(pos, 0)),
                HeaderLineAction::Header => self.push_header()?,
                HeaderLineAction::End => {
                    self.header_line_state = state;
                    self.cursor += 1;
                    self.line_start = self.cursor;
                    self.phase = Phase::Done;
                    trace!(header_num = self.headers.len(), head_size = self.cursor, "parsed request head");
                    return Ok(HeaderLineStatus::End);
                }
            }

            self.header_line_state = state;
            self.cursor += 1;

            if action == HeaderLineAction::Header {
                self.line_start = self.cursor;
                return Ok(HeaderLineStatus::Header);
            }
        }

        Ok(HeaderLineStatus::Incomplete)
    }

    /// Appends the accumulated name and value and clears the accumulators.
    fn push_header(&mut self) -> Result<(), ParseError> {
        let max_headers = self.config.max_headers();
        ensure!(self.headers.len() < max_headers, ParseError::too_many_headers(max_headers));

        match (self.header_name.take(), self.header_value.take()) {
            (Some(name), Some(value)) => {
                self.headers.push(HeaderSpan::new(name, value));
                Ok(())
            }
            _ => Err(ParseError::invalid_header("header line without name or value")),
        }
    }
}
