//! Borrowed view over the bytes of a parsed request.

use enums::{Method, Version};


/// Byte range into the caller's receive buffer
///
/// The parser owns no payload memory: every token it emits is an offset
/// plus a length into the buffer the caller feeds in. The buffer may keep
/// growing between `parse` calls, which is why views store offsets
/// instead of borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub pos: usize,
    pub len: usize,
}

impl Slice {
    /// Resolve the range against the buffer it was produced from
    pub fn get<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.pos..self.pos + self.len]
    }
}

/// The request-line view populated by the parser
///
/// Accessors take the receive buffer as an argument and return slices of
/// it; the view itself never holds request bytes.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) method_p: Slice,
    pub(crate) uri: Slice,
    pub(crate) query: Option<Slice>,
    pub(crate) protocol: Option<Version>,
    pub(crate) protocol_p: Slice,
}

impl Request {
    pub fn new() -> Request {
        Request {
            method: Method::Unknown,
            method_p: Slice::default(),
            uri: Slice::default(),
            query: None,
            protocol: None,
            protocol_p: Slice::default(),
        }
    }

    /// Resolved request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Raw bytes of the method token
    pub fn method_raw<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        self.method_p.get(buffer)
    }

    /// Request target, without the query string
    pub fn uri<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        self.uri.get(buffer)
    }

    /// Query string, when the target carried one
    pub fn query_string<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        self.query.map(|s| s.get(buffer))
    }

    /// Protocol version
    ///
    /// `None` means the version token had the right shape but named a
    /// protocol this parser does not speak; such requests are rejected
    /// with `505` at finalization.
    pub fn version(&self) -> Option<Version> {
        self.protocol
    }

    /// Raw bytes of the version token
    pub fn version_raw<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        self.protocol_p.get(buffer)
    }
}

impl Default for Request {
    fn default() -> Request {
        Request::new()
    }
}
