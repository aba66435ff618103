//! Import statement scanner for JS/TS source.
//!
//! Not a parser. It walks the bytes once, skipping comments, string and template literals, and
//! reports every `import ... 'x'` statement found at brace depth 0, in document order. Regex
//! literals are not recognized; a quote inside one can confuse the scan.

use impsort_domain::first_local_binding;
use impsort_types::record::{ByteRange, ImportRecord};

const IMPORT: &[u8] = b"import";

/// Static import statements of `source`, with byte ranges and first bindings.
pub fn scan_imports(source: &str) -> Vec<ImportRecord> {
    let b = source.as_bytes();
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < b.len() {
        if let Some(next) = skip_comment(b, i) {
            i = next;
            continue;
        }
        match b[i] {
            b'\'' | b'"' => i = skip_string(b, i),
            b'`' => i = skip_template(b, i),
            b'{' | b'(' | b'[' => {
                depth += 1;
                i += 1;
            }
            b'}' | b')' | b']' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b'i' if depth == 0 && at_keyword(b, i, IMPORT) => match read_import(source, i) {
                Some((record, end)) => {
                    records.push(record);
                    i = end;
                }
                None => i += IMPORT.len(),
            },
            c if is_ident_byte(c) => {
                while i < b.len() && is_ident_byte(b[i]) {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    records
}

fn read_import(source: &str, start: usize) -> Option<(ImportRecord, usize)> {
    let b = source.as_bytes();
    let mut j = start + IMPORT.len();

    // `import(...)` and `import.meta` are expressions.
    let next = skip_trivia(b, j);
    if next < b.len() && matches!(b[next], b'(' | b'.') {
        return None;
    }

    loop {
        j = skip_trivia(b, j);
        match b.get(j)? {
            b'\'' | b'"' => break,
            // `import x = require('x')` and anything else that is not a module import.
            b';' | b'=' | b'`' | b'(' => return None,
            _ => j += 1,
        }
    }

    let quote = b[j];
    let after_path = skip_string(b, j);
    if after_path < j + 2 || b[after_path - 1] != quote {
        return None;
    }
    let path = &source[j + 1..after_path - 1];
    let mut end = after_path;

    // Import attributes: `with { type: 'json' }` / `assert { ... }`.
    let k = skip_trivia(b, end);
    for keyword in [b"with".as_slice(), b"assert".as_slice()] {
        if at_keyword(b, k, keyword) {
            let brace = skip_trivia(b, k + keyword.len());
            if b.get(brace) == Some(&b'{') {
                end = skip_balanced(b, brace);
            }
            break;
        }
    }

    let k = skip_inline_space(b, end);
    if b.get(k) == Some(&b';') {
        end = k + 1;
    }

    let text = &source[start..end];
    let mut record = ImportRecord::new(Some(path), text, Some(ByteRange::new(start, end)));
    record.first_binding = first_local_binding(text);
    Some((record, end))
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}

/// `keyword` at `i` as a whole word, not a property access.
fn at_keyword(b: &[u8], i: usize, keyword: &[u8]) -> bool {
    if !b[i.min(b.len())..].starts_with(keyword) {
        return false;
    }
    if i > 0 && (is_ident_byte(b[i - 1]) || b[i - 1] == b'.') {
        return false;
    }
    b.get(i + keyword.len()).is_none_or(|&c| !is_ident_byte(c))
}

fn skip_comment(b: &[u8], i: usize) -> Option<usize> {
    if b.get(i) != Some(&b'/') {
        return None;
    }
    match b.get(i + 1) {
        Some(b'/') => Some(
            b[i..]
                .iter()
                .position(|&c| c == b'\n')
                .map_or(b.len(), |p| i + p + 1),
        ),
        Some(b'*') => Some(
            b[i + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(b.len(), |p| i + 2 + p + 2),
        ),
        _ => None,
    }
}

fn skip_trivia(b: &[u8], mut j: usize) -> usize {
    loop {
        while j < b.len() && b[j].is_ascii_whitespace() {
            j += 1;
        }
        match skip_comment(b, j) {
            Some(next) => j = next,
            None => return j,
        }
    }
}

fn skip_inline_space(b: &[u8], mut j: usize) -> usize {
    while j < b.len() && matches!(b[j], b' ' | b'\t') {
        j += 1;
    }
    j
}

/// `i` is on the opening quote; returns the index after the closing one. An unterminated
/// string ends at the line break.
fn skip_string(b: &[u8], i: usize) -> usize {
    let quote = b[i];
    let mut j = i + 1;
    while j < b.len() {
        match b[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            c if c == quote => return j + 1,
            _ => j += 1,
        }
    }
    b.len()
}

fn skip_template(b: &[u8], i: usize) -> usize {
    let mut j = i + 1;
    while j < b.len() {
        match b[j] {
            b'\\' => j += 2,
            b'`' => return j + 1,
            b'$' if b.get(j + 1) == Some(&b'{') => j = skip_balanced(b, j + 1),
            _ => j += 1,
        }
    }
    b.len()
}

/// `open` is on a `{`; returns the index after its matching `}`.
fn skip_balanced(b: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut j = open;
    while j < b.len() {
        if let Some(next) = skip_comment(b, j) {
            j = next;
            continue;
        }
        match b[j] {
            b'{' => {
                depth += 1;
                j += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                j += 1;
                if depth == 0 {
                    return j;
                }
            }
            b'\'' | b'"' => j = skip_string(b, j),
            b'`' => j = skip_template(b, j),
            _ => j += 1,
        }
    }
    b.len()
}
