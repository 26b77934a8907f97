//! An incremental, zero-copy HTTP/1.x request parser
//!
//! The parser consumes bytes from a receive buffer that grows as a peer
//! streams a request and classifies them into method, target, query,
//! version, header fields and body framing. It is strictly a parser: no
//! socket I/O, no routing, no response generation. Its output is a set
//! of offset views over the caller's buffer plus a few parser-level
//! decisions such as keep-alive versus close.
//!
//! Three properties drive the design:
//!
//! * every invocation may end in the middle of a token, and the next
//!   one resumes there without rescanning consumed bytes;
//! * header names are matched against a small candidate set selected
//!   by their first character, not against the whole table;
//! * memory use is fixed per request: one slot per recognized header,
//!   a bounded array for the rest, and no allocation while parsing.
//!
//! ```
//! use reqparse::{Parser, Request, ParseStatus, Method, Discard};
//!
//! let buf = &b"GET /index.html HTTP/1.1\r\n\
//!              Host: example.com:8080\r\n\r\n"[..];
//! let mut parser = Parser::new();
//! let mut req = Request::new();
//! let status = parser.parse(&mut req, buf, &mut Discard).unwrap();
//! assert_eq!(status, ParseStatus::Complete(buf.len()));
//! assert_eq!(req.method(), Method::Get);
//! assert_eq!(req.uri(buf), &b"/index.html"[..]);
//! assert_eq!(parser.host_port(), Some(8080));
//! ```
//!
//! The last argument is an `ErrorSink`: when the parser rejects a
//! request it reports the HTTP status the caller should send back
//! through it. `Discard` drops the status for callers that act on the
//! returned error alone.

#[macro_use] extern crate log;
#[macro_use] extern crate matches;
#[macro_use] extern crate quick_error;

mod bytes;
mod enums;
mod error;
mod headers;
mod parser;
mod request;
mod tables;

pub use enums::{Connection, Method, Status, Version};
pub use error::{Discard, Error, ErrorSink};
pub use headers::{HeaderField, HeaderId, EXTRA_HEADERS_MAX};
pub use parser::{ParseStatus, Parser};
pub use request::{Request, Slice};
