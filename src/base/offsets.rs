//! Byte offset to character offset conversion
//!
//! rowan ranges are UTF-8 byte offsets; the tree dump reports offsets in
//! Unicode scalar values so the output does not depend on the encoding.

use text_size::{TextRange, TextSize};

/// Maps byte offsets of a text to character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharOffsets {
    /// `table[b]` is the character index of byte `b`. Empty for ASCII text,
    /// where both offsets coincide.
    table: Vec<u32>,
    len: TextSize,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        let len = TextSize::of(text);
        if text.is_ascii() {
            return Self { table: Vec::new(), len };
        }
        let mut table = Vec::with_capacity(text.len() + 1);
        for (index, c) in text.chars().enumerate() {
            table.extend(std::iter::repeat_n(index as u32, c.len_utf8()));
        }
        table.push(text.chars().count() as u32);
        Self { table, len }
    }

    /// Character offset of a byte offset. Offsets inside a multi-byte
    /// character map to that character; offsets past the end are clamped.
    pub fn char_offset(&self, offset: TextSize) -> u32 {
        let offset = offset.min(self.len);
        if self.table.is_empty() {
            return offset.into();
        }
        self.table[usize::from(offset)]
    }

    pub fn char_range(&self, range: TextRange) -> (u32, u32) {
        (self.char_offset(range.start()), self.char_offset(range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identity() {
        let offsets = CharOffsets::new("abc");
        assert_eq!(offsets.char_offset(TextSize::new(2)), 2);
        assert_eq!(offsets.char_offset(TextSize::new(3)), 3);
        assert_eq!(offsets.char_offset(TextSize::new(10)), 3);
    }

    #[test]
    fn test_multibyte_offsets() {
        // '\u{FFFE}' is three bytes in UTF-8
        let offsets = CharOffsets::new("~\u{FFFE}\u{FFFF}");
        assert_eq!(offsets.char_offset(TextSize::new(0)), 0);
        assert_eq!(offsets.char_offset(TextSize::new(1)), 1);
        assert_eq!(offsets.char_offset(TextSize::new(4)), 2);
        assert_eq!(offsets.char_offset(TextSize::new(7)), 3);
        assert_eq!(
            offsets.char_range(TextRange::new(TextSize::new(1), TextSize::new(4))),
            (1, 2)
        );
    }
}
