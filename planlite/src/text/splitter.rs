// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Delimiter splitting that respects brackets, quotes, and escapes
//!
//! Plan text fields such as sort-key and group-key lists are delimited, but
//! the items themselves may contain parenthesized expressions or quoted
//! literals holding the delimiter character. Naive splitting would cut inside
//! an expression, so splits are suppressed while a bracket or quote is open.

/// Split `input` on `delimiter`, honoring balanced brackets and quotes.
///
/// A delimiter occurrence splits only when no bracket or quote is open at
/// that point. `(`, `{`, and `[` each open a span closed by their own
/// counterpart, tracked on a stack so mixed nesting works; a closer that does
/// not match the innermost opener is literal text. `'` and `"` toggle rather
/// than nest: while a quote is open, only the same quote character closes it
/// and brackets are literal. A backslash escapes the following character,
/// which is kept literally and never interpreted.
///
/// Unterminated brackets or quotes at end of input are treated as implicitly
/// closed; the buffered remainder becomes the final segment.
pub fn split_balanced(input: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![input.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut open_spans: Vec<char> = Vec::new();
    let mut chars = input.char_indices();

    while let Some((index, ch)) = chars.next() {
        if ch == '\\' {
            current.push(ch);
            if let Some((_, escaped)) = chars.next() {
                current.push(escaped);
            }
            continue;
        }

        // Inside a quoted span only the matching quote is special.
        if let Some(&quote) = open_spans.last() {
            if quote == '\'' || quote == '"' {
                if ch == quote {
                    open_spans.pop();
                }
                current.push(ch);
                continue;
            }
        }

        if open_spans.is_empty() && input[index..].starts_with(delimiter) {
            segments.push(std::mem::take(&mut current));
            for _ in 1..delimiter.chars().count() {
                chars.next();
            }
            continue;
        }

        match ch {
            '(' | '{' | '[' | '\'' | '"' => open_spans.push(ch),
            ')' => {
                if open_spans.last() == Some(&'(') {
                    open_spans.pop();
                }
            }
            '}' => {
                if open_spans.last() == Some(&'{') {
                    open_spans.pop();
                }
            }
            ']' => {
                if open_spans.last() == Some(&'[') {
                    open_spans.pop();
                }
            }
            _ => {}
        }
        current.push(ch);
    }

    segments.push(current);
    segments
}
