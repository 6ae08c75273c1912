//! Byte-level framing of a top-level JSON array of objects.
//!
//! These helpers work on whatever is currently buffered and report `None`
//! when more input is needed.

use memchr::memchr;

/// What follows a decoded element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `,` another element follows.
    Next,
    /// `]` the array is closed.
    Close,
    Invalid(u8),
}

impl Delimiter {
    pub fn classify(byte: u8) -> Self {
        match byte {
            b',' => Delimiter::Next,
            b']' => Delimiter::Close,
            other => Delimiter::Invalid(other),
        }
    }
}

/// Number of leading JSON whitespace bytes.
pub fn whitespace_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|c| !c.is_ascii_whitespace())
        .unwrap_or(bytes.len())
}

/// Offset just past the first `[`.
pub fn array_start(bytes: &[u8]) -> Option<usize> {
    memchr(b'[', bytes).map(|i| i + 1)
}

/// Length of the complete object at the start of `bytes`, which must begin
/// with `{`. Braces inside strings are ignored.
pub fn object_len(bytes: &[u8]) -> Option<usize> {
    ObjectScanner::default().scan(bytes)
}

/// Finds the end of an object that arrives over several reads.
///
/// Each call resumes where the previous one stopped, so `bytes` must be the
/// same buffer grown at the end.
#[derive(Debug, Clone, Default)]
pub struct ObjectScanner {
    scanned: usize,
    depth: i32,
    in_string: bool,
    escape: bool,
}

impl ObjectScanner {
    /// Length of the complete object at the start of `bytes`, or `None`
    /// when more input is needed.
    pub fn scan(&mut self, bytes: &[u8]) -> Option<usize> {
        if bytes.first() != Some(&b'{') {
            return None;
        }

        for (i, &c) in bytes.iter().enumerate().skip(self.scanned) {
            match (self.in_string, self.escape, c) {
                (true, false, b'\\') => self.escape = true,
                (true, true, _) => self.escape = false,
                (true, false, b'"') => self.in_string = false,
                (false, _, b'"') => self.in_string = true,
                (false, _, b'{') => self.depth += 1,
                (false, _, b'}') => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        self.scanned = i + 1;
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        }

        self.scanned = bytes.len();
        None
    }

    /// Bytes examined so far.
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}
