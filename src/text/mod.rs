//! Delimiter-based line tokenizer.
//!
//! Catalog lines are plain comma-separated text with no quoting or escaping, so
//! a full CSV parser is unnecessary. [`split`] cuts a line on any character of a
//! delimiter set and keeps the fields in their original order.
//!
//! Field rules:
//! - consecutive delimiters yield empty fields (they are never collapsed)
//! - a leading delimiter yields a leading empty field
//! - the residual text after the last delimiter is kept only when non-empty, so
//!   a trailing delimiter does not yield a trailing empty field
//! - an empty delimiter set yields no fields at all
//!
//! # Examples
//! ```rust
//! use habcat::text::split;
//!
//! assert_eq!(split("a,,b", ","), vec!["a", "", "b"]);
//! assert_eq!(split("a,b,", ","), vec!["a", "b"]);
//! assert!(split("abc", "").is_empty());
//! ```

/// Splits `input` on every character contained in `delims`.
///
/// The returned fields borrow from `input`. See the module docs for the exact
/// handling of empty and trailing fields.
pub fn split<'a>(input: &'a str, delims: &str) -> Vec<&'a str> {
    let mut fields = Vec::new();
    if delims.is_empty() {
        return fields;
    }

    let mut start = 0;
    for (idx, ch) in input.char_indices() {
        if delims.contains(ch) {
            fields.push(&input[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    if start < input.len() {
        fields.push(&input[start..]);
    }
    fields
}
