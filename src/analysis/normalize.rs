//! Text normalization applied to decoder output.

use unicode_normalization::UnicodeNormalization;

use crate::model::TextSpan;

/// Typographic ligatures and their plain-letter spellings.
const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalize glyph text: Unicode NFC, ligature expansion, and removal of
/// the replacement character. Whitespace is left untouched.
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.nfc() {
        if c == '\u{FFFD}' {
            continue;
        }
        match LIGATURES.iter().find(|(ligature, _)| *ligature == c) {
            Some((_, replacement)) => result.push_str(replacement),
            None => result.push(c),
        }
    }

    result
}

/// Normalize the text of every span in place.
pub fn normalize_spans(spans: &mut [TextSpan]) {
    for span in spans.iter_mut() {
        if span.text.is_ascii() {
            continue;
        }
        span.text = normalize_text(&span.text);
    }
}
