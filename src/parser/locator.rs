//! Locating `stream ... endstream` regions in a raw PDF buffer.
//!
//! This is a textual scan, not an object parse: stream dictionaries are
//! never read, so compressed streams are located like any other and simply
//! yield no text later on.

use memchr::memmem;

const STREAM_KEYWORD: &[u8] = b"stream";
const ENDSTREAM_KEYWORD: &[u8] = b"endstream";

/// A byte range of the document holding one stream body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentStreamRegion {
    /// Offset of the first body byte
    pub offset: usize,
    /// Body length in bytes
    pub len: usize,
    /// Whether the body ran to the end of the buffer without `endstream`
    pub truncated: bool,
}

impl ContentStreamRegion {
    /// View the region's bytes within the document it was located in.
    pub fn bytes<'a>(&self, document: &'a [u8]) -> &'a [u8] {
        &document[self.offset..self.offset + self.len]
    }

    /// Offset one past the last body byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Iterator over the stream regions of a document, in document order.
///
/// ```
/// use rawpdf::parser::StreamLocator;
///
/// let doc = b"1 0 obj <<>> stream\n(Hi) Tj\nendstream endobj";
/// let regions: Vec<_> = StreamLocator::new(doc).collect();
/// assert_eq!(regions[0].bytes(doc), b"(Hi) Tj");
/// ```
pub struct StreamLocator<'a> {
    data: &'a [u8],
    pos: usize,
    stream_finder: memmem::Finder<'static>,
    end_finder: memmem::Finder<'static>,
}

impl<'a> StreamLocator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            stream_finder: memmem::Finder::new(STREAM_KEYWORD),
            end_finder: memmem::Finder::new(ENDSTREAM_KEYWORD),
        }
    }
}

impl<'a> StreamLocator<'a> {
    /// Offset of the first `endstream` at or after `from` that starts a line.
    ///
    /// The byte before the marker may be the end-of-line that opened the body,
    /// so an empty stream still closes.
    fn find_endstream(&self, from: usize) -> Option<usize> {
        let mut search = from;
        while let Some(found) = self.end_finder.find(&self.data[search..]) {
            let marker_at = search + found;
            if matches!(self.data[marker_at - 1], b'\n' | b'\r') {
                return Some(marker_at);
            }
            search = marker_at + ENDSTREAM_KEYWORD.len();
        }
        None
    }
}

impl<'a> Iterator for StreamLocator<'a> {
    type Item = ContentStreamRegion;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            let Some(found) = self.stream_finder.find(&self.data[self.pos..]) else {
                self.pos = self.data.len();
                return None;
            };
            let keyword_at = self.pos + found;
            let keyword_end = keyword_at + STREAM_KEYWORD.len();

            // Rejects `endstream` and words that merely end in "stream"
            if keyword_at > 0 && self.data[keyword_at - 1].is_ascii_alphanumeric() {
                self.pos = keyword_end;
                continue;
            }

            let Some(eol) = eol_len(self.data, keyword_end) else {
                self.pos = keyword_end;
                continue;
            };
            let body_start = keyword_end + eol;

            let region = match self.find_endstream(body_start) {
                Some(marker_at) => {
                    self.pos = marker_at + ENDSTREAM_KEYWORD.len();
                    let body_end = strip_trailing_eol(self.data, body_start, marker_at);
                    ContentStreamRegion {
                        offset: body_start,
                        len: body_end - body_start,
                        truncated: false,
                    }
                }
                None => {
                    log::debug!("stream at offset {} has no endstream", keyword_at);
                    self.pos = self.data.len();
                    ContentStreamRegion {
                        offset: body_start,
                        len: self.data.len() - body_start,
                        truncated: true,
                    }
                }
            };

            return Some(region);
        }

        None
    }
}

/// Length of the end-of-line marker at `pos`, if any.
fn eol_len(data: &[u8], pos: usize) -> Option<usize> {
    match (data.get(pos), data.get(pos + 1)) {
        (Some(b'\r'), Some(b'\n')) => Some(2),
        (Some(b'\r'), _) | (Some(b'\n'), _) => Some(1),
        _ => None,
    }
}

/// Drop one end-of-line marker before `end`, never crossing `start`.
fn strip_trailing_eol(data: &[u8], start: usize, end: usize) -> usize {
    let body = &data[start..end];
    if body.ends_with(b"\r\n") {
        end - 2
    } else if body.ends_with(b"\n") || body.ends_with(b"\r") {
        end - 1
    } else {
        end
    }
}
