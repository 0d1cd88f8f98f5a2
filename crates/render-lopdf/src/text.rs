/// Encodes text for a Type1 base font with WinAnsiEncoding.
///
/// Latin-1 maps straight through, the typographic punctuation a phone keyboard
/// inserts is mapped to its WinAnsi code, and anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            // Tabs and newlines would be drawn as blanks or garbage.
            '\t' | '\n' | '\r' => b' ',
            c if (c as u32) < 0x20 => b'?',
            c if (c as u32) <= 0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_win_ansi("Name: Jane"), b"Name: Jane".to_vec());
    }

    #[test]
    fn test_latin1_and_smart_punctuation() {
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2019}"), vec![0x92]);
        assert_eq!(encode_win_ansi("a\u{2014}b"), vec![b'a', 0x97, b'b']);
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        assert_eq!(encode_win_ansi("屋根"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\nb"), b"a b".to_vec());
    }
}
