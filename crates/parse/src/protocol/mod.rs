//! Types shared by the scanners and their callers.
//!
//! - [`Span`] and [`HeaderSpan`]: zero-copy references into the scanned buffer
//! - [`RequestHead`]: an owned head built from a completed
//!   [`ParseContext`](crate::scanner::ParseContext)
//! - [`ParseError`]: every way scanning can fail

mod error;
pub use error::ParseError;

mod span;
pub use span::HeaderSpan;
pub use span::Span;

mod head;
pub use head::RequestHead;
