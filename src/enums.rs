/// Version of the HTTP protocol spoken by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Http10,
    Http11,
}

/// Request method resolved against the methods table
///
/// Anything outside this set parses as `Unknown`; the raw token is still
/// available through `Request::method_raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Head,
    Put,
    Delete,
    Options,
    Unknown,
}

/// Classification of the `Connection` header value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    /// No `Connection` header was seen
    Unset,
    KeepAlive,
    Close,
    /// A `Connection` header was seen but its value is neither
    /// `keep-alive` nor `close`
    Unknown,
}

/// Status codes the parser may ask the caller to send
///
/// This is not a general status registry: only the statuses the parser
/// itself emits on rejected requests are listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    BadRequest,
    LengthRequired,
    PayloadTooLarge,
    VersionNotSupported,
}

impl Status {
    /// Numeric code for the status line
    pub fn code(&self) -> u16 {
        match *self {
            Status::BadRequest => 400,
            Status::LengthRequired => 411,
            Status::PayloadTooLarge => 413,
            Status::VersionNotSupported => 505,
        }
    }

    /// Default reason phrase for the status line
    pub fn reason(&self) -> &'static str {
        match *self {
            Status::BadRequest => "Bad Request",
            Status::LengthRequired => "Length Required",
            Status::PayloadTooLarge => "Payload Too Large",
            Status::VersionNotSupported => "HTTP Version Not Supported",
        }
    }
}
