//! Text encoding and measurement for the standard Helvetica fonts.

use super::page::Font;

/// Replacement for characters with no WinAnsi equivalent.
const REPLACEMENT: u8 = b'?';

/// Encodes `text` as WinAnsi bytes for the standard PDF fonts.
///
/// Latin-1 characters map directly. Letters with diacritics outside the
/// encoding (Polish ą, ł, ś, …) fold to their base letter.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20}'..='\u{7e}' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '–' => 0x96,
        '—' => 0x97,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        'Š' => 0x8a,
        'š' => 0x9a,
        'Ž' => 0x8e,
        'ž' => 0x9e,
        _ => fold_diacritic(c).map_or(REPLACEMENT, |base| base as u8),
    }
}

fn fold_diacritic(c: char) -> Option<char> {
    let base = match c {
        'ą' | 'ā' | 'ă' => 'a',
        'Ą' | 'Ā' | 'Ă' => 'A',
        'ć' | 'č' => 'c',
        'Ć' | 'Č' => 'C',
        'ę' | 'ě' | 'ē' => 'e',
        'Ę' | 'Ě' | 'Ē' => 'E',
        'ł' => 'l',
        'Ł' => 'L',
        'ń' | 'ň' => 'n',
        'Ń' | 'Ň' => 'N',
        'ś' | 'ş' => 's',
        'Ś' | 'Ş' => 'S',
        'ź' | 'ż' => 'z',
        'Ź' | 'Ż' => 'Z',
        'ř' => 'r',
        'Ř' => 'R',
        'ů' => 'u',
        'Ů' => 'U',
        _ => return None,
    };
    Some(base)
}

/// Approximate advance width of `text` in points.
///
/// Uses Helvetica's widths grouped into a handful of classes, which is close
/// enough to decide where labels must be truncated.
pub fn text_width(text: &str, size: f32, font: Font) -> f32 {
    let em: f32 = text.chars().map(char_width).sum();
    em * size * weight(font)
}

fn weight(font: Font) -> f32 {
    match font {
        Font::Regular => 1.0,
        Font::Bold => 1.06,
    }
}

fn char_width(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' | ' ' => 0.278,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '-' | '/' => 0.333,
        'm' | 'M' => 0.833,
        'w' | 'W' => 0.800,
        'A'..='Z' => 0.667,
        _ => 0.556,
    }
}

/// Truncates `text` with an ellipsis so it fits in `max_width` points.
pub fn fit_text(text: &str, size: f32, font: Font, max_width: f32) -> String {
    if text_width(text, size, font) <= max_width {
        return text.to_string();
    }
    let ellipsis = "...";
    let budget = max_width - text_width(ellipsis, size, font);
    let mut used = 0.0;
    let mut fitted = String::new();
    for c in text.chars() {
        let width = char_width(c) * size * weight(font);
        if used + width > budget {
            break;
        }
        used += width;
        fitted.push(c);
    }
    let trimmed = fitted.trim_end();
    format!("{trimmed}{ellipsis}")
}
