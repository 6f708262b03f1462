//! An owned, zero-copy request head.
//!
//! [`RequestHead`] keeps the frozen bytes of the head together with the spans
//! the scanners recorded, so every accessor is a slice of the original buffer.
//! Converting into an [`http::Request`] shares that buffer as well: header
//! values and the target are built from `Bytes::slice` views.

use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, Request, Uri, Version};

use super::{HeaderSpan, ParseError, Span};
use crate::scanner::ParseContext;

/// A fully parsed request head.
#[derive(Debug, Clone)]
pub struct RequestHead {
    bytes: Bytes,
    method: Span,
    uri: Span,
    query_string: Option<Span>,
    protocol: Span,
    headers: Vec<HeaderSpan>,
}

impl RequestHead {
    /// Takes the spans out of a complete `context`; `bytes` must be the buffer it scanned.
    ///
    /// The header list is moved out of the context, which is left ready for
    /// [`ParseContext::reset`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Incomplete`] if `context` has not reached the end
    /// of the headers, and the stored error if `context` failed.
    pub fn from_context(bytes: Bytes, context: &mut ParseContext) -> Result<Self, ParseError> {
        context.ensure_complete()?;

        let (Some(method), Some(uri), Some(protocol)) = (context.method(), context.uri(), context.protocol()) else {
            return Err(ParseError::Incomplete);
        };

        let last = context.headers().last().map_or(protocol.end(), |header| header.value.end());
        if bytes.len() < last {
            return Err(ParseError::cursor_out_of_bounds(last, bytes.len()));
        }

        Ok(Self {
            bytes,
            method,
            uri,
            query_string: context.query_string(),
            protocol,
            headers: context.take_headers(),
        })
    }

    /// The raw bytes of the head, terminating blank line included.
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Size in bytes of the head.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn method_bytes(&self) -> &[u8] {
        self.method.slice(&self.bytes)
    }

    /// The target path, without the query string.
    pub fn path(&self) -> &[u8] {
        self.uri.slice(&self.bytes)
    }

    /// The query string; `None` when the target had no `?` or nothing followed it.
    pub fn query(&self) -> Option<&[u8]> {
        self.query_string.map(|span| span.slice(&self.bytes))
    }

    pub fn protocol(&self) -> &[u8] {
        self.protocol.slice(&self.bytes)
    }

    /// The protocol version, either HTTP/1.0 or HTTP/1.1.
    pub fn version(&self) -> Version {
        match self.protocol().last() {
            Some(b'0') => Version::HTTP_10,
            _ => Version::HTTP_11,
        }
    }

    pub fn header_spans(&self) -> &[HeaderSpan] {
        &self.headers
    }

    /// Headers as `(name, value)` pairs in arrival order, duplicates included.
    pub fn headers(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.headers.iter().map(|header| (header.name(&self.bytes), header.value(&self.bytes)))
    }

    /// Value of the first header whose name matches `name` ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers().find(|(header_name, _)| header_name.eq_ignore_ascii_case(name.as_bytes())).map(|(_, value)| value)
    }

    /// # Errors
    ///
    /// Returns [`ParseError::Conversion`] if the method is not a valid token.
    pub fn method(&self) -> Result<Method, ParseError> {
        Method::from_bytes(self.method_bytes()).map_err(|e| ParseError::conversion("method", e))
    }

    /// The request target, path and query, as an [`Uri`] sharing the head's buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Conversion`] if the target holds bytes an [`Uri`] rejects.
    pub fn uri(&self) -> Result<Uri, ParseError> {
        let end = self.query_string.map_or(self.uri.end(), |span| span.end());
        Uri::from_maybe_shared(self.bytes.slice(self.uri.start()..end)).map_err(|e| ParseError::conversion("uri", e))
    }

    /// Converts into an [`http::Request`] without a body.
    ///
    /// # Errors
    ///
    /// Returns an error if the method, target or a header cannot be represented
    /// by the `http` types, e.g. a header value holding a zero byte.
    pub fn into_request(self) -> Result<Request<()>, ParseError> {
        let mut request = Request::new(());
        *request.method_mut() = self.method()?;
        *request.uri_mut() = self.uri()?;
        *request.version_mut() = self.version();

        let headers = request.headers_mut();
        headers.reserve(self.headers.len());

        for header in &self.headers {
            let name = HeaderName::from_bytes(header.name(&self.bytes)).map_err(ParseError::invalid_header)?;
            let value =
                HeaderValue::from_maybe_shared(self.bytes.slice(header.value.range())).map_err(ParseError::invalid_header)?;
            headers.append(name, value);
        }

        Ok(request)
    }
}
