//! Whole-document sweep for printable literal strings.
//!
//! Some producers leave readable text in literals outside any `Tj`/`TJ`
//! operation (document info, annotations, form fields). The sweep finds
//! every flat literal in the raw buffer, streams or not, and keeps the ones
//! that decode to printable Latin-1 text.
//!
//! A flat literal holds no unescaped parenthesis. An unescaped `(` inside a
//! candidate starts a new candidate, so every byte is walked at most once.

use std::sync::OnceLock;

use memchr::memchr;
use regex::Regex;

use super::literal::{decode_literal, DecodedFragment};

/// Payloads shorter than this many raw bytes are ignored.
pub const MIN_LOOSE_LITERAL_BYTES: usize = 10;

/// Payloads longer than this many raw bytes are abandoned.
pub const MAX_LOOSE_LITERAL_BYTES: usize = 4096;

fn printable() -> &'static Regex {
    static PRINTABLE: OnceLock<Regex> = OnceLock::new();
    PRINTABLE.get_or_init(|| {
        Regex::new(r"^[\x20-\x7E\xA0-\xFF\s]+$").expect("printable pattern is valid")
    })
}

/// Iterator over printable literal strings anywhere in a document.
///
/// ```
/// use rawpdf::parser::LooseLiterals;
///
/// let doc = b"<< /Title (Lease agreement) /Author (x) >>";
/// let found: Vec<_> = LooseLiterals::new(doc).map(|f| f.into_string()).collect();
/// assert_eq!(found, vec!["Lease agreement"]);
/// ```
pub struct LooseLiterals<'a> {
    data: &'a [u8],
    pos: usize,
    max_len: usize,
}

impl<'a> LooseLiterals<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            max_len: MAX_LOOSE_LITERAL_BYTES,
        }
    }

    /// Set the longest payload, in raw bytes, still considered.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

impl<'a> Iterator for LooseLiterals<'a> {
    type Item = DecodedFragment;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            let open = self.pos + memchr(b'(', &self.data[self.pos..])?;
            let start = open + 1;

            let close = match flat_literal_end(self.data, start, self.max_len) {
                FlatScan::Closed(close) => close,
                FlatScan::Reopened(resume) | FlatScan::Abandoned(resume) => {
                    self.pos = resume;
                    continue;
                }
            };
            self.pos = close + 1;

            let payload = &self.data[start..close];
            if payload.len() < MIN_LOOSE_LITERAL_BYTES {
                continue;
            }

            let fragment = decode_literal(payload);
            if printable().is_match(fragment.as_str()) {
                return Some(fragment);
            }
        }

        None
    }
}

/// Outcome of walking a flat literal body.
#[derive(Debug, PartialEq, Eq)]
enum FlatScan {
    /// Unescaped `)` at this offset
    Closed(usize),
    /// Unescaped `(` at this offset; a new candidate starts here
    Reopened(usize),
    /// Body ran past the length bound or the buffer; resume here
    Abandoned(usize),
}

fn flat_literal_end(data: &[u8], start: usize, max_len: usize) -> FlatScan {
    let limit = start.saturating_add(max_len).min(data.len());
    let mut pos = start;

    while pos < limit {
        match data[pos] {
            b'\\' => pos += 2,
            b'(' => return FlatScan::Reopened(pos),
            b')' => return FlatScan::Closed(pos),
            _ => pos += 1,
        }
    }

    FlatScan::Abandoned(pos.min(data.len()))
}
