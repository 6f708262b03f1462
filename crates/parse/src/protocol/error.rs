use std::io;
use thiserror::Error;

/// Errors produced while scanning a request head.
///
/// Grammar errors are terminal: once a [`ParseContext`](crate::scanner::ParseContext)
/// returns one, every further call on that context returns the same error.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http request target")]
    InvalidRequestTarget,

    #[error("invalid http version")]
    InvalidVersion,

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("line size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeLine { current_size: usize, max_size: usize },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("cursor {cursor} is beyond the buffer of length {len}")]
    CursorOutOfBounds { cursor: usize, len: usize },

    #[error("header line scanned before the request line completed")]
    OutOfOrder,

    #[error("request head is incomplete")]
    Incomplete,

    #[error("{target} cannot be represented by the http types: {reason}")]
    Conversion { target: &'static str, reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn too_large_line(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeLine { current_size, max_size }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn cursor_out_of_bounds(cursor: usize, len: usize) -> Self {
        Self::CursorOutOfBounds { cursor, len }
    }

    pub fn conversion<S: ToString>(target: &'static str, str: S) -> Self {
        Self::Conversion { target, reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true if the error is a violation of the request head grammar.
    pub fn is_grammar_error(&self) -> bool {
        matches!(self, Self::InvalidMethod | Self::InvalidRequestTarget | Self::InvalidVersion | Self::InvalidHeader { .. })
    }

    /// Produces an equivalent error so a failed context can report it again.
    ///
    /// `io::Error` is not `Clone`, so the io variant keeps only kind and message.
    pub(crate) fn replay(&self) -> Self {
        match self {
            Self::InvalidMethod => Self::InvalidMethod,
            Self::InvalidRequestTarget => Self::InvalidRequestTarget,
            Self::InvalidVersion => Self::InvalidVersion,
            Self::InvalidHeader { reason } => Self::InvalidHeader { reason: reason.clone() },
            Self::TooManyHeaders { max_num } => Self::TooManyHeaders { max_num: *max_num },
            Self::TooLargeLine { current_size, max_size } => Self::too_large_line(*current_size, *max_size),
            Self::TooLargeHeader { current_size, max_size } => Self::too_large_header(*current_size, *max_size),
            Self::CursorOutOfBounds { cursor, len } => Self::cursor_out_of_bounds(*cursor, *len),
            Self::OutOfOrder => Self::OutOfOrder,
            Self::Incomplete => Self::Incomplete,
            Self::Conversion { target, reason } => Self::conversion(*target, reason),
            Self::Io { source } => Self::io(io::Error::new(source.kind(), source.to_string())),
        }
    }
}
