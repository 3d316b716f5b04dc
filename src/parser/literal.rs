//! Literal string escape decoding.
//!
//! Callers delimit the token; [`decode_literal`] resolves the escapes of an
//! already delimited payload.

use std::fmt;

/// Decoded text of one literal-string payload.
///
/// Holds no PDF escape sequences: `\n`, `\r`, `\t`, `\(`, `\)`, `\\` and
/// `\ddd` are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecodedFragment(String);

impl DecodedFragment {
    /// Borrow the decoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the decoded text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// True when the fragment holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for DecodedFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecodedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DecodedFragment> for String {
    fn from(fragment: DecodedFragment) -> Self {
        fragment.0
    }
}

/// Decode the bytes between one matched pair of parentheses.
///
/// Bytes map one-to-one onto code points 0-255. Unrecognized escapes such
/// as `\b` pass through untouched, backslash included. Octal escapes take
/// exactly three digits; values above 255 become the matching Unicode
/// scalar.
///
/// ```
/// use rawpdf::parser::decode_literal;
///
/// assert_eq!(decode_literal(b"Hello\\050world\\051").as_str(), "Hello(world)");
/// ```
pub fn decode_literal(payload: &[u8]) -> DecodedFragment {
    let mut out = String::with_capacity(payload.len());
    let mut pos = 0;

    while pos < payload.len() {
        let byte = payload[pos];
        if byte != b'\\' {
            out.push(char::from(byte));
            pos += 1;
            continue;
        }

        let escaped = match payload.get(pos + 1) {
            Some(b'n') => Some('\n'),
            Some(b'r') => Some('\r'),
            Some(b't') => Some('\t'),
            Some(b'(') => Some('('),
            Some(b')') => Some(')'),
            Some(b'\\') => Some('\\'),
            _ => None,
        };

        if let Some(c) = escaped {
            out.push(c);
            pos += 2;
        } else if let Some(c) = octal_escape(&payload[pos + 1..]) {
            out.push(c);
            pos += 4;
        } else {
            out.push('\\');
            pos += 1;
        }
    }

    DecodedFragment(out)
}

/// Three octal digits at the start of `digits`, as a character.
fn octal_escape(digits: &[u8]) -> Option<char> {
    let digits = digits.get(..3)?;
    let mut code = 0u32;
    for &d in digits {
        if !(b'0'..=b'7').contains(&d) {
            return None;
        }
        code = (code << 3) | u32::from(d - b'0');
    }
    // \777 tops out at 511, always a valid scalar
    char::from_u32(code)
}
