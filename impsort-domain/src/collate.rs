//! Case- and punctuation-insensitive string collation.
//!
//! Comparison works on a folded key: canonical decomposition with combining marks dropped, then
//! lowercase, with whitespace and punctuation removed. `React`, `react` and `re-act` collate
//! equal; equal keys keep their input order wherever the engine sorts. Significant symbols sort
//! ahead of digits and letters.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Kept ASCII symbols, in collation order. Each maps to a weight below any printable character.
const SYMBOL_ORDER: [char; 9] = ['`', '^', '+', '<', '=', '>', '|', '~', '$'];

pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c) && !is_ignorable(*c))
        .flat_map(char::to_lowercase)
        .map(symbol_weight)
        .collect()
}

pub fn compare_collated(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

fn symbol_weight(c: char) -> char {
    SYMBOL_ORDER
        .iter()
        .position(|&symbol| symbol == c)
        .and_then(|i| char::from_u32(i as u32 + 1))
        .unwrap_or(c)
}

fn is_ignorable(c: char) -> bool {
    if c.is_whitespace() {
        return true;
    }
    if c.is_ascii() {
        // Symbols (`$`, `+`, `|`, ...) are significant; only punctuation is ignored.
        return c.is_ascii_punctuation()
            && !matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~');
    }
    matches!(c, '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' | '\u{3001}'..='\u{3003}')
}
