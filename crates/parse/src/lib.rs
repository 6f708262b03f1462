//! An incremental, zero-copy parser for HTTP/1.x request heads
//!
//! This crate scans the request line and the header lines of an HTTP/1.0 or
//! HTTP/1.1 request out of a byte buffer that may arrive in fragments. Every
//! call resumes exactly where the previous one stopped, nothing before the
//! cursor is read twice, and nothing is copied: the results are spans, plain
//! `(offset, length)` pairs into the caller's buffer.
//!
//! # Features
//!
//! - Resumable request line and header line automatons, both persisted in one
//!   [`scanner::ParseContext`]
//! - Strict grammar: uppercase methods, origin-form targets, `HTTP/1.0` and
//!   `HTTP/1.1` only, `Name: value` headers terminated by CRLF
//! - Query strings kept apart from the path; an absent query string is `None`,
//!   never an empty span
//! - Explicit limits on header count, line size and head size
//! - A `tokio_util` [`codec::RequestHeadDecoder`] producing owned, zero-copy
//!   [`protocol::RequestHead`]s convertible into `http::Request<()>`
//!
//! # Example
//!
//! ```
//! use micro_http_parse::scanner::{HeaderLineStatus, ParseContext, RequestLineStatus};
//!
//! let buf = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
//! let mut context = ParseContext::new();
//!
//! // the request line first ...
//! assert_eq!(context.parse_request_line(buf).unwrap(), RequestLineStatus::Complete);
//! assert_eq!(context.method_bytes(buf), Some(&b"GET"[..]));
//! assert_eq!(context.uri_bytes(buf), Some(&b"/search"[..]));
//! assert_eq!(context.query_string_bytes(buf), Some(&b"q=rust"[..]));
//! assert_eq!(context.protocol_bytes(buf), Some(&b"HTTP/1.1"[..]));
//!
//! // ... then one header line per call
//! while context.parse_header_line(buf).unwrap() == HeaderLineStatus::Header {}
//!
//! assert!(context.is_complete());
//! assert_eq!(context.headers()[0].name(buf), b"Host");
//! ```
//!
//! # Architecture
//!
//! - [`scanner`]: the automatons, the parse context and its limits
//! - [`protocol`]: spans, the owned request head and the error type
//! - [`codec`]: `tokio_util` decoder integration
//!
//! # Error Handling
//!
//! All failures are reported as [`protocol::ParseError`]. Grammar errors are
//! terminal for the request: the context refuses to scan any further and the
//! caller is expected to drop the connection. Running out of input is not an
//! error; the scanners return an `Incomplete` status instead.
//!
//! # Limitations
//!
//! - Request heads only: no body decoding, no response encoding
//! - No percent-decoding or normalization of the target
//! - Header values are not interpreted

pub mod codec;
pub mod protocol;
pub mod scanner;

mod utils;
pub(crate) use utils::ensure;
