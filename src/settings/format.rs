// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! printf-style handling of `annotation_ext_format`.
//!
//! Only two directives are recognised: `%d` is the index placeholder and `%%`
//! is a literal percent sign. Any other `%` sequence is copied as-is.

/// Count the `%d` placeholders in a format string, ignoring escaped `%%`
pub fn placeholder_count(format: &str) -> usize {
    let mut count = 0;
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c == '%' && chars.next() == Some('d') {
            count += 1;
        }
    }
    count
}

/// Substitute `index` for the `%d` placeholder of `format`
pub fn format_with_index(format: &str, index: usize) -> String {
    let mut out = String::with_capacity(format.len() + 4);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str(&index.to_string()),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}
