//! Codec integration for the scanners.
//!
//! [`RequestHeadDecoder`] implements `tokio_util::codec::Decoder`, so the
//! scanners can sit behind a `FramedRead` on any `AsyncRead`.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_http_parse::codec::RequestHeadDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestHeadDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET /hello HTTP/1.1\r\nHost: localhost\r\n\r\n"[..]);
//!
//! let head = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(head.path(), b"/hello");
//! assert_eq!(head.header("host"), Some(&b"localhost"[..]));
//! ```

mod head_decoder;

pub use head_decoder::RequestHeadDecoder;
