//! Record scanning: word tokenization and literal substring search.
//!
//! A record is the opaque byte slice handed to one `write` call. Nothing here
//! assumes it is valid UTF-8.

use memchr::memmem::Finder;

use crate::trigger::Trigger;

/// Iterator over the whitespace-delimited words of a record.
///
/// Whitespace is the Unicode `White_Space` property, decoded from the valid
/// UTF-8 parts of the record. A multi-byte character is never split. Bytes
/// that are not valid UTF-8 count as non-space and stay inside the
/// surrounding word.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    record: &'a [u8],
    pos: usize,
}

impl<'a> Words<'a> {
    /// Starts tokenizing `record` from its first byte.
    #[must_use]
    pub fn new(record: &'a [u8]) -> Self {
        Self { record, pos: 0 }
    }

    /// Length of the whitespace character at `at`, or `None` if the bytes
    /// there are not whitespace (including invalid UTF-8).
    fn space_len(&self, at: usize) -> Option<usize> {
        let (c, len) = decode_char(&self.record[at..])?;
        c.is_whitespace().then_some(len)
    }

    /// Length of whatever sits at `at`: one decoded character, or a single
    /// byte when the input there is not valid UTF-8.
    fn unit_len(&self, at: usize) -> usize {
        decode_char(&self.record[at..]).map_or(1, |(_, len)| len)
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.record.len();

        while self.pos < end {
            match self.space_len(self.pos) {
                Some(len) => self.pos += len,
                None => break,
            }
        }
        if self.pos >= end {
            return None;
        }

        let start = self.pos;
        while self.pos < end && self.space_len(self.pos).is_none() {
            self.pos += self.unit_len(self.pos);
        }

        Some(&self.record[start..self.pos])
    }
}

/// Decodes the first UTF-8 character of `bytes` and its encoded length.
fn decode_char(bytes: &[u8]) -> Option<(char, usize)> {
    let first = *bytes.first()?;
    let len = match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let s = std::str::from_utf8(bytes.get(..len)?).ok()?;
    s.chars().next().map(|c| (c, len))
}

/// Returns the whitespace-delimited words of `record`.
#[must_use]
pub fn words(record: &[u8]) -> Words<'_> {
    Words::new(record)
}

/// Literal substring matcher built once per trigger.
///
/// Construction cannot fail and is linear in the trigger length.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    finder: Finder<'static>,
}

impl SubstringMatcher {
    /// Builds a matcher for the exact bytes of `trigger`.
    #[must_use]
    pub fn new(trigger: &Trigger) -> Self {
        Self {
            finder: Finder::new(trigger.as_bytes()).into_owned(),
        }
    }

    /// Returns true if the trigger occurs anywhere in `record`.
    #[must_use]
    pub fn is_match(&self, record: &[u8]) -> bool {
        self.finder.find(record).is_some()
    }
}
