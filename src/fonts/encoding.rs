//! WinAnsi (CP-1252) coverage for the builtin fonts.
//!
//! The standard PDF fonts are declared with `/WinAnsiEncoding`, so every shown string has to
//! fit that single-byte code page. Text is reduced to encodable characters before layout so the
//! measured width matches what is drawn.

use std::borrow::Cow;

use log::warn;

/// Character drawn in place of anything the code page cannot express.
pub const REPLACEMENT: char = '?';

/// WinAnsi code of the bullet glyph.
pub const BULLET_CODE: u8 = 0x95;

/// Code the PDF backend writes for U+2022. WinAnsi leaves 0x7F undefined.
pub const BACKEND_BULLET_CODE: u8 = 0x7F;

/// Codes 0x80..=0x9F, indexed from 0x80. `None` marks the slots WinAnsi leaves unused.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Returns the WinAnsi code of `ch`, if the code page has one.
pub fn win_ansi_code(ch: char) -> Option<u8> {
    match ch as u32 {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => u8::try_from(code).ok(),
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|&slot| slot == Some(ch))
            .and_then(|index| u8::try_from(0x80 + index).ok()),
    }
}

/// Closest encodable letter for common Central European letters, so names stay readable.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'Ā' | 'Ă' | 'Ą' => 'A',
        'ā' | 'ă' | 'ą' => 'a',
        'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ď' | 'Đ' => 'D',
        'ď' | 'đ' => 'd',
        'Ē' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'Ğ' | 'Ģ' => 'G',
        'ğ' | 'ģ' => 'g',
        'Ī' | 'Į' | 'İ' => 'I',
        'ī' | 'į' | 'ı' => 'i',
        'Ķ' => 'K',
        'ķ' => 'k',
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ł' => 'L',
        'ĺ' | 'ļ' | 'ľ' | 'ł' => 'l',
        'Ń' | 'Ņ' | 'Ň' => 'N',
        'ń' | 'ņ' | 'ň' => 'n',
        'Ō' | 'Ő' => 'O',
        'ō' | 'ő' => 'o',
        'Ŕ' | 'Ř' => 'R',
        'ŕ' | 'ř' => 'r',
        'Ś' | 'Ş' => 'S',
        'ś' | 'ş' => 's',
        'Ţ' | 'Ť' => 'T',
        'ţ' | 'ť' => 't',
        'Ū' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'Ź' | 'Ż' => 'Z',
        'ź' | 'ż' => 'z',
        _ => return None,
    };
    Some(base)
}

/// Rewrites `text` so every character has a WinAnsi code.
///
/// Accented letters outside the code page lose their accent; anything else becomes
/// [`REPLACEMENT`]. Each rewrite is logged once per call.
pub fn to_win_ansi(text: &str) -> Cow<'_, str> {
    if text.chars().all(|ch| win_ansi_code(ch).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut substituted = Vec::new();
    let encodable = text
        .chars()
        .map(|ch| {
            if win_ansi_code(ch).is_some() {
                return ch;
            }
            let replacement = base_letter(ch).unwrap_or(REPLACEMENT);
            substituted.push(ch);
            replacement
        })
        .collect::<String>();

    warn!(
        "Characters {:?} in {:?} have no WinAnsi glyph in the builtin fonts; drawn as {:?}.",
        substituted, text, encodable
    );
    Cow::Owned(encodable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_range_uses_windows_codes() {
        assert_eq!(win_ansi_code('\u{2022}'), Some(BULLET_CODE));
        assert_eq!(win_ansi_code('\u{2014}'), Some(0x97));
        assert_eq!(win_ansi_code('\u{201C}'), Some(0x93));
        assert_eq!(win_ansi_code('\u{20AC}'), Some(0x80));
        assert_eq!(win_ansi_code('\u{0178}'), Some(0x9F));
    }

    #[test]
    fn latin1_maps_to_itself() {
        assert_eq!(win_ansi_code('A'), Some(b'A'));
        assert_eq!(win_ansi_code('ó'), Some(0xF3));
        assert_eq!(win_ansi_code('\u{00A0}'), Some(0xA0));
    }

    #[test]
    fn control_characters_have_no_code() {
        assert_eq!(win_ansi_code('\u{7F}'), None);
        assert_eq!(win_ansi_code('\u{95}'), None);
        assert_eq!(win_ansi_code('\n'), None);
    }

    #[test]
    fn encodable_text_is_borrowed() {
        assert!(matches!(
            to_win_ansi("Jos\u{e9} \u{2022} Caf\u{e9} \u{2014} \u{201C}hi\u{201D}"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn accents_outside_the_code_page_are_dropped() {
        assert_eq!(to_win_ansi("Łukasz Żółć"), "Lukasz Zólc");
    }

    #[test]
    fn other_scripts_are_replaced() {
        assert_eq!(to_win_ansi("Li Lei 李雷"), "Li Lei ??");
        assert_eq!(to_win_ansi("a\u{7F}b"), "a?b");
    }
}
