//! Recognized-header identifiers and the slot types filled by the
//! classifier.

use request::Slice;


/// Number of entries in the recognized-header table
pub const HEADER_TABLE_SIZE: usize = 17;

/// Number of extra (unrecognized) headers kept per request
///
/// Once the array is full further unrecognized headers are dropped
/// silently. Recognized headers have reserved slots and are unaffected
/// by this bound.
pub const EXTRA_HEADERS_MAX: usize = 8;

/// Identifier of a recognized header
///
/// The discriminants index both the name table and the per-request slot
/// array, and the table is grouped by first letter so that a
/// first-character test selects a contiguous candidate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderId {
    Accept = 0,
    AcceptCharset = 1,
    AcceptEncoding = 2,
    AcceptLanguage = 3,
    Authorization = 4,
    Cookie = 5,
    Connection = 6,
    ContentLength = 7,
    ContentRange = 8,
    ContentType = 9,
    IfModifiedSince = 10,
    Host = 11,
    LastModified = 12,
    LastModifiedSince = 13,
    Referer = 14,
    Range = 15,
    UserAgent = 16,
}

/// A single header row, as offsets into the receive buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderField {
    pub key: Slice,
    pub val: Slice,
}
