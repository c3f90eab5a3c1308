//! XML character classes used by the hand-written lexical states.

/// XML 1.0 (5th edition) `NameStartChar` without `:`.
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// XML 1.0 `NameChar` without `:`.
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Byte length of the NCName at the start of `text`, 0 if there is none.
pub fn ncname_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if is_name_start_char(c) => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !is_name_char(c))
        .map_or(text.len(), |(i, _)| i)
}

/// Byte length of the leading XML whitespace of `text`.
pub fn whitespace_len(text: &str) -> usize {
    text.find(|c| !is_xml_whitespace(c)).unwrap_or(text.len())
}

/// Byte length of the first character of `text` (1 for an empty string so
/// callers always make progress).
pub fn first_char_len(text: &str) -> usize {
    text.chars().next().map_or(1, char::len_utf8)
}

/// Whether `text` starts with an NCName start character.
pub fn starts_with_name(text: &str) -> bool {
    text.chars().next().is_some_and(is_name_start_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ncname_len() {
        assert_eq!(ncname_len("abc def"), 3);
        assert_eq!(ncname_len("a-b.c:d"), 5);
        assert_eq!(ncname_len("1abc"), 0);
        assert_eq!(ncname_len("-abc"), 0);
        assert_eq!(ncname_len("\u{e9}t\u{e9}"), 5);
        assert_eq!(ncname_len(""), 0);
    }

    #[test]
    fn test_whitespace_len() {
        assert_eq!(whitespace_len(" \t\r\nx"), 4);
        assert_eq!(whitespace_len("x"), 0);
        assert_eq!(whitespace_len("  "), 2);
        // NBSP is not XML whitespace
        assert_eq!(whitespace_len("\u{a0}"), 0);
    }
}
