//! Incremental scanners for the request head.
//!
//! Two automatons share one [`ParseContext`]:
//!
//! - the request line scanner, [`ParseContext::parse_request_line`], recognizes
//!   `METHOD SP TARGET SP HTTP/1.x CRLF` and records method, target path,
//!   optional query string and protocol as [`Span`](crate::protocol::Span)s
//! - the header line scanner, [`ParseContext::parse_header_line`], recognizes
//!   one `Name: value CRLF` line per call, or the blank line ending the block
//!
//! Both take the whole buffer received so far and resume at the context's
//! cursor, returning an `Incomplete` status when the buffer runs out. Each
//! automaton is an enum with a pure transition function
//! ([`RequestLineState::next`], [`HeaderLineState::next`]) so the scanners
//! can be driven, and tested, one byte at a time.
//!
//! # Example
//!
//! ```
//! use micro_http_parse::scanner::{HeaderLineStatus, ParseContext, RequestLineStatus};
//!
//! let mut buf = Vec::new();
//! let mut context = ParseContext::new();
//!
//! buf.extend_from_slice(b"GET /index.html HT");
//! assert_eq!(context.parse_request_line(&buf).unwrap(), RequestLineStatus::Incomplete);
//!
//! buf.extend_from_slice(b"TP/1.1\r\nAccept: */*\r\n\r\n");
//! assert_eq!(context.parse_request_line(&buf).unwrap(), RequestLineStatus::Complete);
//! assert_eq!(context.parse_header_line(&buf).unwrap(), HeaderLineStatus::Header);
//! assert_eq!(context.parse_header_line(&buf).unwrap(), HeaderLineStatus::End);
//!
//! assert_eq!(context.uri_bytes(&buf), Some(&b"/index.html"[..]));
//! ```

mod config;
mod context;
mod header_line;
mod request_line;
mod status;

pub use config::{MAX_HEAD_BYTES, MAX_HEADER_NUM, MAX_LINE_BYTES, ParserConfig};
pub use context::ParseContext;
pub use header_line::{HeaderLineAction, HeaderLineState};
pub use request_line::{RequestLineAction, RequestLineState};
pub use status::{HeaderLineStatus, RequestLineStatus};
