//! Text-level handling of destructured (`{ a, b }`) import specifiers.
//!
//! Statements are never re-parsed into a syntax tree. The brace body is located with a pattern,
//! reordered, and spliced back, so everything outside the braces (default import, `type`
//! qualifier, quotes, semicolon) is preserved byte for byte.

use crate::collate::compare_collated;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// `import { .. } from 'x'`, `import type { .. } from 'x'`, `import Default, { .. } from 'x'`.
static BRACED_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^import\s*(?:type\s+)?(?:[A-Za-z_$][\w$]*\s*,\s*)?\{(?P<body>[^{}]*)\}\s*from\s*(?:'[^']*'|"[^"]*")\s*;?\s*$"#,
    )
    .expect("braced import pattern is a valid regex")
});

static IMPORT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import\b\s*(?P<clause>[^'"]*?)\s*\bfrom\s*['"]"#)
        .expect("import clause pattern is a valid regex")
});

const DEFAULT_INDENT: &str = "  ";

/// Reorders the named specifiers of a single import statement.
pub trait SpecifierSorter {
    /// The statement with its specifier list sorted, or the input unchanged when there is
    /// nothing to sort (no braces, unparseable body, already sorted).
    fn sort_specifiers<'a>(&self, statement: &'a str) -> Cow<'a, str>;

    /// The first adjacent `(earlier, later)` pair that is out of order.
    fn first_out_of_order_pair(&self, statement: &str) -> Option<(String, String)>;
}

/// Pattern-based [`SpecifierSorter`]; ascending, case- and punctuation-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSpecifierSorter;

impl SpecifierSorter for TextSpecifierSorter {
    fn sort_specifiers<'a>(&self, statement: &'a str) -> Cow<'a, str> {
        let Some(list) = SpecifierList::parse(statement) else {
            return Cow::Borrowed(statement);
        };
        if list.is_sorted() {
            return Cow::Borrowed(statement);
        }

        let mut sorted = list.entries.clone();
        sorted.sort_by(|a, b| compare_entries(a, b));

        let mut out = String::with_capacity(statement.len() + 8);
        out.push_str(&statement[..list.body_start]);
        out.push_str(&render_body(list.body, &sorted, list.trailing_comma));
        out.push_str(&statement[list.body_end..]);
        Cow::Owned(out)
    }

    fn first_out_of_order_pair(&self, statement: &str) -> Option<(String, String)> {
        let list = SpecifierList::parse(statement)?;
        list.entries
            .windows(2)
            .find(|pair| compare_entries(pair[0], pair[1]) == Ordering::Greater)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
    }
}

struct SpecifierList<'a> {
    body: &'a str,
    body_start: usize,
    body_end: usize,
    entries: Vec<&'a str>,
    trailing_comma: bool,
}

impl<'a> SpecifierList<'a> {
    fn parse(statement: &'a str) -> Option<Self> {
        let caps = BRACED_IMPORT.captures(statement)?;
        let body = caps.name("body")?;
        let text = body.as_str();
        if text.contains("//") || text.contains("/*") {
            return None;
        }

        let mut entries: Vec<&str> = text.split(',').map(str::trim).collect();
        let trailing_comma = entries.len() > 1 && entries.last().is_some_and(|e| e.is_empty());
        if trailing_comma {
            entries.pop();
        }
        if entries.iter().any(|e| e.is_empty()) {
            return None;
        }

        Some(Self {
            body: text,
            body_start: body.start(),
            body_end: body.end(),
            entries,
            trailing_comma,
        })
    }

    fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| compare_entries(pair[0], pair[1]) != Ordering::Greater)
    }
}

fn compare_entries(a: &str, b: &str) -> Ordering {
    compare_collated(specifier_key(a), specifier_key(b))
}

/// Compare key of one specifier: the imported name, without `type` qualifier or ` as ` rename.
pub fn specifier_key(entry: &str) -> &str {
    let entry = entry.trim();
    let entry = entry
        .strip_prefix("type ")
        .map(str::trim_start)
        .unwrap_or(entry);
    entry.split(" as ").next().unwrap_or(entry).trim()
}

fn render_body(original: &str, entries: &[&str], trailing_comma: bool) -> String {
    let comma = if trailing_comma { "," } else { "" };

    if !original.contains('\n') {
        let lead = if original.starts_with(char::is_whitespace) { " " } else { "" };
        let trail = if original.ends_with(char::is_whitespace) { " " } else { "" };
        return format!("{lead}{}{comma}{trail}", entries.join(", "));
    }

    let newline = if original.contains("\r\n") { "\r\n" } else { "\n" };
    let indent = second_line_indent(original);
    let closing = original
        .rsplit('\n')
        .next()
        .filter(|tail| tail.trim().is_empty())
        .unwrap_or("");

    let lines: Vec<String> = entries.iter().map(|e| format!("{indent}{e}")).collect();
    format!(
        "{newline}{}{comma}{newline}{closing}",
        lines.join(&format!(",{newline}"))
    )
}

fn second_line_indent(body: &str) -> &str {
    body.split('\n')
        .nth(1)
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .filter(|indent| !indent.is_empty())
        .unwrap_or(DEFAULT_INDENT)
}

/// Local name bound by the first specifier of an import statement.
///
/// `import React, { useState } from 'react'` → `React`; `import * as path from 'path'` → `path`;
/// `import { a as b } from 'x'` → `b`. Side-effect imports have no binding.
pub fn first_local_binding(statement: &str) -> Option<String> {
    let caps = IMPORT_CLAUSE.captures(statement.trim_start())?;
    let mut clause = caps.name("clause")?.as_str().trim();

    if let Some(rest) = clause.strip_prefix("type")
        && rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '*')
    {
        clause = rest.trim_start();
    }

    let binding = if let Some(named) = clause.strip_prefix('{') {
        let body = named.split('}').next().unwrap_or_default();
        let first = body.split(',').map(str::trim).find(|e| !e.is_empty())?;
        let first = first.strip_prefix("type ").map(str::trim_start).unwrap_or(first);
        match first.split_once(" as ") {
            Some((_, local)) => local.trim(),
            None => first,
        }
    } else if let Some(namespace) = clause.strip_prefix('*') {
        namespace.trim_start().strip_prefix("as")?.trim()
    } else {
        clause.split(',').next().unwrap_or_default().trim()
    };

    (!binding.is_empty()).then(|| binding.to_string())
}
