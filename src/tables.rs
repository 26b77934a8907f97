//! Static token tables for request methods and recognized headers.

use enums::Method;
use headers::{HeaderId, HEADER_TABLE_SIZE};


/// Recognized request methods with their parser codes
///
/// The order is stable and gives each method its code; lookups are
/// case-sensitive as method names are by the protocol.
pub static METHODS: [(&'static str, Method); 6] = [
    ("GET", Method::Get),
    ("POST", Method::Post),
    ("HEAD", Method::Head),
    ("PUT", Method::Put),
    ("DELETE", Method::Delete),
    ("OPTIONS", Method::Options),
];

/// Recognized header names, lowercase, indexed by `HeaderId`
pub static HEADER_NAMES: [&'static str; HEADER_TABLE_SIZE] = [
    "accept",
    "accept-charset",
    "accept-encoding",
    "accept-language",
    "authorization",
    "cookie",
    "connection",
    "content-length",
    "content-range",
    "content-type",
    "if-modified-since",
    "host",
    "last-modified",
    "last-modified-since",
    "referer",
    "range",
    "user-agent",
];

/// Resolve a method token against the methods table
pub fn method_lookup(token: &[u8]) -> Method {
    for &(name, method) in METHODS.iter() {
        if name.as_bytes() == token {
            return method;
        }
    }
    Method::Unknown
}

/// Candidate window in the header table for the first byte of a row
///
/// Narrowing by first character keeps per-row matching to a handful of
/// length and tail comparisons instead of a sweep over the whole table.
pub fn candidate_window(first: u8) -> Option<(usize, usize)> {
    match first.to_ascii_lowercase() {
        b'a' => Some((HeaderId::Accept as usize,
                      HeaderId::Authorization as usize)),
        b'c' => Some((HeaderId::Cookie as usize,
                      HeaderId::ContentType as usize)),
        b'h' => Some((HeaderId::Host as usize,
                      HeaderId::Host as usize)),
        b'i' => Some((HeaderId::IfModifiedSince as usize,
                      HeaderId::IfModifiedSince as usize)),
        b'l' => Some((HeaderId::LastModified as usize,
                      HeaderId::LastModifiedSince as usize)),
        b'r' => Some((HeaderId::Referer as usize,
                      HeaderId::Range as usize)),
        b'u' => Some((HeaderId::UserAgent as usize,
                      HeaderId::UserAgent as usize)),
        _ => None,
    }
}
