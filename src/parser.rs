//! The resumable request parser: the request-line scanner, the
//! header-block scanner and the session driver on top of them.

use bytes::{lowercase_eq, parse_decimal, rfind_byte, NumError};
use enums::{Connection, Method, Version};
use error::{Error, ErrorSink};
use headers::{HeaderField, HeaderId, EXTRA_HEADERS_MAX, HEADER_TABLE_SIZE};
use request::{Request, Slice};
use tables::{candidate_window, method_lookup, HEADER_NAMES};


/// Outcome of a `parse` call that did not reject the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// The request is fully received; the payload is the number of
    /// bytes of the buffer it occupies
    Complete(usize),
    /// More bytes are needed; grow the buffer and call `parse` again
    Partial,
}

/// Coarse phase of the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    RequestLine,
    /// Right after the request line, before we know whether a header
    /// block follows at all
    Between,
    Headers,
    EndOfHeaders,
    Body,
}

/// Fine-grained sub-state within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Method,
    Target,
    Query,
    Version,
    FirstLineEnd,
    /// The LF that closes a request without any header rows
    BlockEnd,
    HeaderKey,
    HeaderValue,
    HeaderValueStart,
    HeaderLineEnd,
}

/// The resumable HTTP/1.x request parser
///
/// One instance is bound to one request. The caller grows a receive
/// buffer as the peer streams bytes in and re-invokes `parse` with it;
/// the parser resumes at the byte after the last one it examined and
/// never rescans consumed input. All results are offsets into the
/// caller's buffer; the parser allocates nothing while running.
#[derive(Debug)]
pub struct Parser {
    level: Level,
    status: State,
    /// Offset of the next byte to examine (the resume point)
    i: usize,
    /// Offset where the current token began
    start: usize,
    /// Offset one past the last completed token
    end: usize,
    /// Bytes consumed since the last token start, -1 between tokens
    chars: i64,
    header_key: usize,
    header_sep: usize,
    header_val: usize,
    header_window: Option<(usize, usize)>,
    headers: [Option<HeaderField>; HEADER_TABLE_SIZE],
    extra: [HeaderField; EXTRA_HEADERS_MAX],
    extra_count: usize,
    content_length: u64,
    host_port: Option<u16>,
    connection: Connection,
    body_received: u64,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            level: Level::RequestLine,
            status: State::Method,
            i: 0,
            start: 0,
            end: 0,
            chars: 0,
            header_key: 0,
            header_sep: 0,
            header_val: 0,
            header_window: None,
            headers: [None; HEADER_TABLE_SIZE],
            extra: [HeaderField::default(); EXTRA_HEADERS_MAX],
            extra_count: 0,
            content_length: 0,
            host_port: None,
            connection: Connection::Unset,
            body_received: 0,
        }
    }

    /// Advance the parser over the receive buffer
    ///
    /// `buffer` must start at the first byte of the request and may only
    /// grow between calls with the same parser; scanning resumes where
    /// the previous call stopped. On rejection the HTTP status to send
    /// is reported through `sink` exactly once and the parser must not
    /// be fed again.
    pub fn parse<E>(&mut self, req: &mut Request, buffer: &[u8], sink: &mut E)
        -> Result<ParseStatus, Error>
        where E: ErrorSink,
    {
        match self.run(req, buffer) {
            Ok(status) => Ok(status),
            Err(e) => {
                let status = e.status();
                debug!("request rejected: {} (sending {} {})",
                    e, status.code(), status.reason());
                sink.emit_status(status);
                Err(e)
            }
        }
    }

    fn run(&mut self, req: &mut Request, buffer: &[u8])
        -> Result<ParseStatus, Error>
    {
        let len = buffer.len();
        while self.i < len {
            let b = buffer[self.i];
            match self.level {
                Level::RequestLine => {
                    let done = self.request_line_byte(req, b, buffer)?;
                    if let Some(status) = done {
                        return Ok(status);
                    }
                }
                Level::Between => {
                    if b == b'\r' {
                        // empty header block: expect the closing LF and
                        // finalize straight from the request-line level
                        self.level = Level::RequestLine;
                        self.status = State::BlockEnd;
                        self.step();
                    } else {
                        self.level = Level::Headers;
                        self.status = State::HeaderKey;
                        self.chars = 0;
                        // same byte opens the first header row
                        self.header_byte(b, buffer)?;
                    }
                }
                Level::Headers => {
                    self.header_byte(b, buffer)?;
                }
                Level::EndOfHeaders => {
                    if b != b'\n' {
                        return Err(Error::BadHeader);
                    }
                    self.level = Level::Body;
                    self.chars = -1;
                    self.next_token();
                }
                Level::Body => break,
            }
        }

        if self.level == Level::Body {
            if self.content_length > 0 {
                self.body_received += (len - self.i) as u64;
                self.i = len;
                if self.body_received == self.content_length {
                    return self.finalize(req);
                }
                return Ok(ParseStatus::Partial);
            }
            // no declared body: whatever is left in the buffer belongs
            // to a pipelined request
            return self.finalize(req);
        }
        if self.level == Level::RequestLine && self.status == State::Method
            && self.i > 10
        {
            // no recognizable method is this long
            return Err(Error::BadMethod);
        }
        Ok(ParseStatus::Partial)
    }

    /// One byte of the request line: METHOD, TARGET, QUERY and VERSION
    fn request_line_byte(&mut self, req: &mut Request, b: u8, buffer: &[u8])
        -> Result<Option<ParseStatus>, Error>
    {
        match self.status {
            State::Method => {
                if b == b' ' {
                    self.mark_end();
                    self.status = State::Target;
                    if self.token_len() < 2 {
                        return Err(Error::BadMethod);
                    }
                    req.method = method_lookup(self.token().get(buffer));
                    req.method_p = self.token();
                    self.next_token();
                } else {
                    self.step();
                }
            }
            State::Target => {
                if b == b' ' {
                    self.mark_end();
                    self.status = State::Version;
                    if self.token_len() < 1 {
                        return Err(Error::BadRequestTarget);
                    }
                    req.uri = self.token();
                    self.next_token();
                } else if b == b'?' {
                    self.mark_end();
                    if self.token_len() < 1 {
                        return Err(Error::BadRequestTarget);
                    }
                    req.uri = self.token();
                    self.status = State::Query;
                    self.next_token();
                } else if b == b'\r' || b == b'\n' {
                    return Err(Error::BadRequestLine);
                } else {
                    self.step();
                }
            }
            State::Query => {
                if b == b' ' {
                    self.mark_end();
                    req.query = Some(self.token());
                    self.status = State::Version;
                    self.next_token();
                } else if b == b'\r' || b == b'\n' {
                    return Err(Error::BadRequestLine);
                } else {
                    self.step();
                }
            }
            State::Version => {
                if b == b'\r' {
                    self.mark_end();
                    if self.token_len() != 8 {
                        return Err(Error::VersionNotSupported);
                    }
                    {
                        let token = self.token().get(buffer);
                        if &token[..7] != b"HTTP/1." {
                            return Err(Error::VersionNotSupported);
                        }
                        req.protocol = match token[7] {
                            b'1' => Some(Version::Http11),
                            b'0' => Some(Version::Http10),
                            _ => None,
                        };
                    }
                    req.protocol_p = self.token();
                    self.status = State::FirstLineEnd;
                    self.step();
                } else {
                    self.step();
                }
            }
            State::FirstLineEnd => {
                if b != b'\n' {
                    return Err(Error::BadRequestLine);
                }
                self.level = Level::Between;
                self.next_token();
            }
            State::BlockEnd => {
                if b != b'\n' {
                    return Err(Error::BadRequestLine);
                }
                self.i += 1;
                return self.finalize(req).map(Some);
            }
            _ => unreachable!(),
        }
        Ok(None)
    }

    /// One byte of a header row
    fn header_byte(&mut self, b: u8, buffer: &[u8]) -> Result<(), Error> {
        match self.status {
            State::HeaderKey => {
                if b == b'\r' {
                    if self.chars != 0 {
                        return Err(Error::BadHeader);
                    }
                    // empty row: the header block is over
                    self.level = Level::EndOfHeaders;
                    self.next_token();
                    return Ok(());
                }
                if self.chars == 0 {
                    // the first byte of a row preselects the candidate
                    // range of recognized headers compared on row end
                    self.header_window = candidate_window(b);
                    self.header_key = self.i;
                }
                if b == b':' {
                    self.header_sep = self.i;
                    self.mark_end();
                    if self.token_len() < 1 {
                        return Err(Error::BadHeader);
                    }
                    self.status = State::HeaderValue;
                    self.next_token();
                } else if b == b'\n' || b == b' ' {
                    return Err(Error::BadHeader);
                } else {
                    self.step();
                }
            }
            State::HeaderValue => {
                // skip left padding; the value starts at the first byte
                // that is not a space
                if b == b'\r' || b == b'\n' {
                    return Err(Error::BadHeader);
                }
                if b != b' ' {
                    self.status = State::HeaderValueStart;
                    self.start = self.i;
                    self.header_val = self.i;
                }
                self.step();
            }
            State::HeaderValueStart => {
                if b == b'\r' {
                    self.mark_end();
                    self.status = State::HeaderLineEnd;
                    self.classify_header(buffer)?;
                    self.next_token();
                } else if b == b'\n' {
                    return Err(Error::BadHeader);
                } else {
                    self.step();
                }
            }
            State::HeaderLineEnd => {
                if b != b'\n' {
                    return Err(Error::BadHeader);
                }
                self.status = State::HeaderKey;
                self.chars = -1;
                self.next_token();
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Match a completed header row against the candidate window and
    /// store it in its slot, or in the extras array
    fn classify_header(&mut self, buffer: &[u8]) -> Result<(), Error> {
        let key_len = self.header_sep - self.header_key;
        if key_len < 1 {
            return Err(Error::BadHeader);
        }
        let field = HeaderField {
            key: Slice { pos: self.header_key, len: key_len },
            val: Slice {
                pos: self.header_val,
                len: self.end - self.header_val,
            },
        };
        if let Some((min, max)) = self.header_window {
            for idx in min..max + 1 {
                let name = HEADER_NAMES[idx].as_bytes();
                if name.len() != key_len {
                    continue;
                }
                // the first byte already matched when the window was
                // selected
                let tail = &buffer[self.header_key + 1..self.header_sep];
                if !lowercase_eq(&name[1..], tail) {
                    continue;
                }
                return self.record_known(idx, field, buffer);
            }
        }
        // not a recognized name: keep the row in the bounded extras
        // array, or drop it silently once the array is full
        if self.extra_count < EXTRA_HEADERS_MAX {
            self.extra[self.extra_count] = field;
            self.extra_count += 1;
        }
        Ok(())
    }

    fn record_known(&mut self, idx: usize, mut field: HeaderField,
        buffer: &[u8])
        -> Result<(), Error>
    {
        if idx == HeaderId::Host as usize {
            self.scan_host_port(&mut field, buffer)?;
        } else if idx == HeaderId::ContentLength as usize {
            self.content_length = match parse_decimal(field.val.get(buffer)) {
                Ok(n) => n,
                Err(NumError::Overflow) => {
                    return Err(Error::ContentLengthTooLarge);
                }
                Err(NumError::Malformed) => {
                    return Err(Error::BadContentLength);
                }
            };
        } else if idx == HeaderId::Connection as usize {
            let value = field.val.get(buffer);
            self.connection = if lowercase_eq(b"keep-alive", value) {
                Connection::KeepAlive
            } else if lowercase_eq(b"close", value) {
                Connection::Close
            } else {
                Connection::Unknown
            };
        }
        self.headers[idx] = Some(field);
        Ok(())
    }

    /// Carve a trailing `:port` out of the Host value
    ///
    /// On success the port is stored and the value is shrunk to the
    /// host alone. A value starting with `:` carries no host and is
    /// left untouched.
    fn scan_host_port(&mut self, field: &mut HeaderField, buffer: &[u8])
        -> Result<(), Error>
    {
        let sep = {
            let value = field.val.get(buffer);
            let sep = match rfind_byte(value, b':') {
                Some(sep) if sep > 0 => sep,
                _ => return Ok(()),
            };
            let port = &value[sep + 1..];
            if port.is_empty() || port.len() > 5 {
                return Err(Error::BadHostPort);
            }
            match parse_decimal(port) {
                Ok(n) if n <= 65535 => {
                    self.host_port = Some(n as u16);
                }
                _ => return Err(Error::BadHostPort),
            }
            sep
        };
        field.val.len = sep;
        Ok(())
    }

    /// Semantic checks applied to every complete request
    fn finalize(&mut self, req: &Request) -> Result<ParseStatus, Error> {
        if req.protocol.is_none() {
            return Err(Error::VersionNotSupported);
        }
        if (req.method == Method::Post || req.method == Method::Put)
            && self.headers[HeaderId::ContentLength as usize].is_none()
        {
            return Err(Error::LengthRequired);
        }
        trace!("request complete: {:?}, {} bytes", req.method, self.i);
        Ok(ParseStatus::Complete(self.i))
    }

    fn step(&mut self) {
        self.i += 1;
        self.chars += 1;
    }

    fn next_token(&mut self) {
        self.start = self.i + 1;
        self.step();
    }

    fn mark_end(&mut self) {
        self.end = self.i;
        self.chars = -1;
    }

    fn token(&self) -> Slice {
        Slice { pos: self.start, len: self.end - self.start }
    }

    fn token_len(&self) -> usize {
        self.end - self.start
    }

    /// Offset of the next byte the parser will examine
    ///
    /// After a `Complete` verdict this equals the bytes the request
    /// occupies in the buffer.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Recognized header slot, when the request carried that header
    pub fn header(&self, id: HeaderId) -> Option<&HeaderField> {
        self.headers[id as usize].as_ref()
    }

    /// Value bytes of a recognized header
    pub fn header_value<'a>(&self, id: HeaderId, buffer: &'a [u8])
        -> Option<&'a [u8]>
    {
        self.headers[id as usize].as_ref().map(|f| f.val.get(buffer))
    }

    /// Headers that did not match the recognized table, in arrival order
    pub fn extra_headers(&self) -> &[HeaderField] {
        &self.extra[..self.extra_count]
    }

    /// Parsed Content-Length value, zero when the header is absent
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Port carved out of the Host header, when one was present
    pub fn host_port(&self) -> Option<u16> {
        self.host_port
    }

    /// Classification of the Connection header
    pub fn connection(&self) -> Connection {
        self.connection
    }

    /// Body bytes credited against Content-Length so far
    pub fn body_received(&self) -> u64 {
        self.body_received
    }

    /// Whether the connection should stay open for the next request
    ///
    /// HTTP/1.1 keeps the connection unless the client asked to close
    /// it; HTTP/1.0 closes unless the client asked for `Keep-Alive`.
    pub fn keep_alive(&self, req: &Request) -> bool {
        match req.protocol {
            Some(Version::Http11) => self.connection != Connection::Close,
            Some(Version::Http10) => {
                matches!(self.connection, Connection::KeepAlive)
            }
            None => false,
        }
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}
