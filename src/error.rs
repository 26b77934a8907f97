use enums::Status;


quick_error! {
    /// Error returned when the parser rejects a request
    ///
    /// Every error maps to the HTTP status the caller should send back,
    /// see `Error::status`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Error {
        BadMethod {
            description("request method is empty or unreasonably long")
        }
        BadRequestLine {
            description("malformed request line")
        }
        BadRequestTarget {
            description("request target is empty")
        }
        BadHeader {
            description("malformed header row")
        }
        BadHostPort {
            description("port in the Host header is not a valid number")
        }
        BadContentLength {
            description("Content-Length is not a valid number")
        }
        ContentLengthTooLarge {
            description("Content-Length overflows the supported range")
        }
        LengthRequired {
            description("request method requires a Content-Length header")
        }
        VersionNotSupported {
            description("protocol version is not HTTP/1.0 or HTTP/1.1")
        }
    }
}

impl Error {
    /// The HTTP status the caller should reply with for this error
    pub fn status(&self) -> Status {
        match *self {
            Error::ContentLengthTooLarge => Status::PayloadTooLarge,
            Error::LengthRequired => Status::LengthRequired,
            Error::VersionNotSupported => Status::VersionNotSupported,
            _ => Status::BadRequest,
        }
    }
}

/// Sink for the HTTP status of a rejected request
///
/// The parser never writes a response itself. When it rejects a request
/// it reports the status to send through this trait exactly once; the
/// caller is responsible for emitting the error page and closing the
/// connection.
pub trait ErrorSink {
    /// Called once with the status of the rejected request
    fn emit_status(&mut self, status: Status);
}

/// Sink that ignores the status, for callers that act on the returned
/// error alone
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ErrorSink for Discard {
    fn emit_status(&mut self, _status: Status) {}
}

/// Collecting sink, mostly useful in tests
impl ErrorSink for Vec<Status> {
    fn emit_status(&mut self, status: Status) {
        self.push(status);
    }
}
