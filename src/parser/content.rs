//! Content-stream scanning for text-showing operators.
//!
//! The scanner is a single-pass state machine over one content stream. It
//! recognizes the two text-showing forms `(string) Tj` and
//! `[(string) kerning (string) ...] TJ` and yields their literal payloads in
//! stream order. Everything else in the stream (names, numbers, other
//! operators, dictionaries, hex strings, comments) is stepped over.

use super::literal::{decode_literal, DecodedFragment};

/// The text-showing operator of a [`TextOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOperator {
    /// `Tj`: show a single string
    ShowText,
    /// `TJ`: show an array of strings interleaved with kerning adjustments
    ShowArray,
}

impl ShowOperator {
    /// The operator token as it appears in the stream.
    pub fn token(&self) -> &'static str {
        match self {
            ShowOperator::ShowText => "Tj",
            ShowOperator::ShowArray => "TJ",
        }
    }
}

/// One recovered text-showing operator invocation.
///
/// Payloads borrow the raw bytes between the parentheses; kerning numbers
/// from the array form are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOperation<'a> {
    pub operator: ShowOperator,
    pub payloads: Vec<&'a [u8]>,
}

impl<'a> TextOperation<'a> {
    /// Decode every payload, in order.
    pub fn decode(&self) -> Vec<DecodedFragment> {
        self.payloads.iter().map(|p| decode_literal(p)).collect()
    }
}

/// Operand waiting for its operator.
enum Operand<'a> {
    Literal(&'a [u8]),
    Array(Vec<&'a [u8]>),
}

/// An array being collected; `depth` counts unmatched `[`.
struct ArrayFrame<'a> {
    payloads: Vec<&'a [u8]>,
    depth: usize,
}

enum ScanState<'a> {
    Scanning,
    InLiteralString {
        start: usize,
        depth: usize,
        array: Option<ArrayFrame<'a>>,
    },
    InArray(ArrayFrame<'a>),
}

/// Lazy scanner over the text operations of one content stream.
///
/// ```
/// use rawpdf::parser::ContentScanner;
///
/// let ops: Vec<_> = ContentScanner::new(b"BT (Hi) Tj ET").collect();
/// assert_eq!(ops.len(), 1);
/// assert_eq!(ops[0].payloads, vec![&b"Hi"[..]]);
/// ```
pub struct ContentScanner<'a> {
    data: &'a [u8],
    pos: usize,
    state: ScanState<'a>,
    pending: Option<Operand<'a>>,
}

impl<'a> ContentScanner<'a> {
    /// Create a scanner over one content stream.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            state: ScanState::Scanning,
            pending: None,
        }
    }

    /// Flatten the operations into decoded fragments.
    pub fn fragments(self) -> impl Iterator<Item = DecodedFragment> + 'a {
        self.flat_map(|op| op.decode())
    }

    /// Advance the state machine by one step.
    ///
    /// Returns an operation when an operator completes one.
    fn step(&mut self) -> Option<TextOperation<'a>> {
        match std::mem::replace(&mut self.state, ScanState::Scanning) {
            ScanState::Scanning => self.step_scanning(),
            ScanState::InLiteralString {
                start,
                depth,
                array,
            } => {
                self.step_literal(start, depth, array);
                None
            }
            ScanState::InArray(frame) => {
                self.step_array(frame);
                None
            }
        }
    }

    fn step_scanning(&mut self) -> Option<TextOperation<'a>> {
        let byte = self.data[self.pos];

        match byte {
            _ if is_whitespace(byte) => self.pos += 1,
            b'%' => self.skip_comment(),
            b'(' => {
                self.pending = None;
                self.pos += 1;
                self.state = ScanState::InLiteralString {
                    start: self.pos,
                    depth: 1,
                    array: None,
                };
            }
            b'[' => {
                self.pending = None;
                self.pos += 1;
                self.state = ScanState::InArray(ArrayFrame {
                    payloads: Vec::new(),
                    depth: 1,
                });
            }
            b'<' => {
                self.pending = None;
                if self.data.get(self.pos + 1) == Some(&b'<') {
                    self.pos += 2;
                } else {
                    self.skip_hex_string();
                }
            }
            b'/' => {
                self.pending = None;
                self.pos += 1;
                self.skip_regular();
            }
            _ if is_delimiter(byte) => {
                self.pending = None;
                self.pos += 1;
            }
            _ => {
                let start = self.pos;
                self.skip_regular();
                let word = &self.data[start..self.pos];
                return self.apply_operator(word);
            }
        }

        None
    }

    fn step_literal(&mut self, start: usize, mut depth: usize, array: Option<ArrayFrame<'a>>) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'\\' => self.pos += 2,
                b'(' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        let payload = &self.data[start..self.pos];
                        self.pos += 1;
                        match array {
                            Some(mut frame) => {
                                frame.payloads.push(payload);
                                self.state = ScanState::InArray(frame);
                            }
                            None => self.pending = Some(Operand::Literal(payload)),
                        }
                        return;
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
        // Unterminated at end of stream: the state is dropped with the data.
    }

    fn step_array(&mut self, mut frame: ArrayFrame<'a>) {
        while self.pos < self.data.len() {
            let byte = self.data[self.pos];
            match byte {
                b'(' => {
                    self.pos += 1;
                    self.state = ScanState::InLiteralString {
                        start: self.pos,
                        depth: 1,
                        array: Some(frame),
                    };
                    return;
                }
                b'[' => {
                    frame.depth += 1;
                    self.pos += 1;
                }
                b']' => {
                    frame.depth -= 1;
                    self.pos += 1;
                    if frame.depth == 0 {
                        self.pending = Some(Operand::Array(frame.payloads));
                        return;
                    }
                }
                b'<' => self.skip_hex_string(),
                b'%' => self.skip_comment(),
                _ => self.pos += 1,
            }
        }
    }

    /// Match an operator word against the pending operand.
    fn apply_operator(&mut self, word: &[u8]) -> Option<TextOperation<'a>> {
        let pending = self.pending.take();

        match (word, pending) {
            (b"Tj", Some(Operand::Literal(payload))) => Some(TextOperation {
                operator: ShowOperator::ShowText,
                payloads: vec![payload],
            }),
            (b"TJ", Some(Operand::Array(payloads))) => Some(TextOperation {
                operator: ShowOperator::ShowArray,
                payloads,
            }),
            (b"ID", _) => {
                self.skip_inline_image();
                None
            }
            _ => None,
        }
    }

    fn skip_comment(&mut self) {
        while self.pos < self.data.len() && !matches!(self.data[self.pos], b'\n' | b'\r') {
            self.pos += 1;
        }
    }

    fn skip_hex_string(&mut self) {
        match memchr::memchr(b'>', &self.data[self.pos..]) {
            Some(offset) => self.pos += offset + 1,
            None => self.pos = self.data.len(),
        }
    }

    fn skip_regular(&mut self) {
        while self.pos < self.data.len() && is_regular(self.data[self.pos]) {
            self.pos += 1;
        }
    }

    /// Skip binary inline image data up to the `EI` operator.
    fn skip_inline_image(&mut self) {
        let rest = &self.data[self.pos..];
        let mut search = 0;
        while let Some(found) = memchr::memmem::find(&rest[search..], b"EI") {
            let at = search + found;
            let before_ok = at == 0 || is_whitespace(rest[at - 1]);
            let after_ok = rest.get(at + 2).map_or(true, |&b| !is_regular(b));
            if before_ok && after_ok {
                self.pos += at + 2;
                return;
            }
            search = at + 2;
        }
        self.pos = self.data.len();
    }
}

impl<'a> Iterator for ContentScanner<'a> {
    type Item = TextOperation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            if let Some(op) = self.step() {
                return Some(op);
            }
        }
        None
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b'\x00' | b'\x09' | b'\x0a' | b'\x0c' | b'\x0d' | b' ')
}

fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_regular(byte: u8) -> bool {
    !(is_delimiter(byte) || is_whitespace(byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(stream: &[u8]) -> Vec<String> {
        ContentScanner::new(stream)
            .fragments()
            .map(DecodedFragment::into_string)
            .collect()
    }

    #[test]
    fn test_single_show() {
        assert_eq!(texts(b"BT /F1 12 Tf 72 712 Td (Hello) Tj ET"), vec!["Hello"]);
    }

    #[test]
    fn test_escaped_paren_does_not_terminate() {
        assert_eq!(texts(b"(a\\)b) Tj"), vec!["a)b"]);
    }

    #[test]
    fn test_nested_parens_kept() {
        assert_eq!(texts(b"(f(x) = y) Tj"), vec!["f(x) = y"]);
    }

    #[test]
    fn test_array_show_drops_kerning() {
        let ops: Vec<_> = ContentScanner::new(b"[(He) -250 (llo)] TJ").collect();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].operator, ShowOperator::ShowArray);
        assert_eq!(ops[0].payloads, vec![&b"He"[..], &b"llo"[..]]);
    }

    #[test]
    fn test_array_with_escapes_and_brackets_inside_strings() {
        assert_eq!(
            texts(b"[(a]b) 10 (c\\)[d)] TJ"),
            vec!["a]b", "c)[d"]
        );
    }

    #[test]
    fn test_operations_in_stream_order() {
        let stream = b"BT (one) Tj [(two) (three)] TJ (four) Tj ET";
        assert_eq!(texts(stream), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_no_whitespace_before_operator() {
        assert_eq!(texts(b"(tight)Tj[(a)(b)]TJ"), vec!["tight", "a", "b"]);
    }

    #[test]
    fn test_wrong_operator_for_operand() {
        // A literal followed by TJ and an array followed by Tj are not shows
        assert!(texts(b"(x) TJ [(y)] Tj").is_empty());
    }

    #[test]
    fn test_other_operator_clears_operand() {
        assert!(texts(b"(x) Tw Tj").is_empty());
        assert!(texts(b"(x) 0 Tj").is_empty());
    }

    #[test]
    fn test_lowercase_operator_ignored() {
        assert!(texts(b"(x) tj [(y)] tj").is_empty());
    }

    #[test]
    fn test_operator_must_be_whole_word() {
        assert!(texts(b"(x) Tjx").is_empty());
    }

    #[test]
    fn test_hex_strings_skipped() {
        assert_eq!(texts(b"<48656C6C6F> Tj (after) Tj"), vec!["after"]);
        assert_eq!(texts(b"[<4869> (mixed)] TJ"), vec!["mixed"]);
    }

    #[test]
    fn test_dictionary_and_names_skipped() {
        let stream = b"/Span <</MCID 0>> BDC (marked) Tj EMC";
        assert_eq!(texts(stream), vec!["marked"]);
    }

    #[test]
    fn test_comment_skipped() {
        let stream = b"% (not text) Tj\n(text) Tj";
        assert_eq!(texts(stream), vec!["text"]);
    }

    #[test]
    fn test_inline_image_skipped() {
        let stream = b"BI /W 2 /H 2 ID \x01(\x02)\x03 Tj EI (after) Tj";
        assert_eq!(texts(stream), vec!["after"]);
    }

    #[test]
    fn test_unterminated_literal_yields_nothing() {
        assert_eq!(texts(b"(ok) Tj (broken Tj"), vec!["ok"]);
    }

    #[test]
    fn test_unterminated_array_yields_nothing() {
        assert_eq!(texts(b"(ok) Tj [(a) (b) TJ"), vec!["ok"]);
    }

    #[test]
    fn test_empty_payload_is_yielded_empty() {
        assert_eq!(texts(b"() Tj"), vec![""]);
    }

    #[test]
    fn test_compressed_bytes_yield_nothing() {
        let stream: Vec<u8> = (0u8..=255).cycle().take(2048).collect();
        // Arbitrary binary must not panic
        let _ = texts(&stream);
    }

    #[test]
    fn test_show_operator_token() {
        assert_eq!(ShowOperator::ShowText.token(), "Tj");
        assert_eq!(ShowOperator::ShowArray.token(), "TJ");
    }
}
