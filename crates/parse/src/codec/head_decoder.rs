//! [`Decoder`] adapter driving the scanners over a [`BytesMut`] read buffer.
//!
//! The decoder keeps one [`ParseContext`] across calls, so each `decode` only
//! looks at bytes that arrived since the previous one. When the head is
//! complete it is split off the front of the buffer and frozen; anything after
//! the blank line (a body, or the next pipelined request) stays in the buffer.

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::{ParseError, RequestHead};
use crate::scanner::{ParseContext, ParserConfig};

/// Decoder for HTTP request heads implementing the [`Decoder`] trait.
#[derive(Debug, Default)]
pub struct RequestHeadDecoder {
    context: ParseContext,
}

impl RequestHeadDecoder {
    /// Creates a new `RequestHeadDecoder` with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { context: ParseContext::with_config(config) }
    }

    /// The context of the head being decoded.
    pub fn context(&self) -> &ParseContext {
        &self.context
    }
}

impl Decoder for RequestHeadDecoder {
    type Item = RequestHead;
    type Error = ParseError;

    /// Attempts to decode a request head from the provided buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(head))` once the blank line ending the headers was read
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the head is malformed or exceeds a limit
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(head_size) = self.context.parse_head(src)? else {
            return Ok(None);
        };

        let bytes = src.split_to(head_size).freeze();
        let head = RequestHead::from_context(bytes, &mut self.context)?;
        self.context.reset();

        trace!(head_size, header_num = head.header_spans().len(), remaining = src.len(), "decoded request head");
        Ok(Some(head))
    }
}
