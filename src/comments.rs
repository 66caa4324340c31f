//! Comment removal for program listings.
//!
//! One left-to-right pass over the source: string and character literals are
//! matched first and copied through, comments are replaced by a single space.
//! A `//` comment keeps its line break. A block comment spanning several
//! lines collapses to one space, so later lines move up.

use regex::{Captures, Regex};
use std::sync::LazyLock;

// Alternation order matters only for ties; the leftmost match always wins,
// so a `//` inside a literal is consumed as part of that literal.
// An unterminated block comment runs to the end of the input.
static RE_COMMENT_OR_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?ms)//.*?$",
        r"|/\*.*?(?:\*/|\z)",
        r#"|'(?:\\.|[^\\'])*'"#,
        r#"|"(?:\\.|[^\\"])*""#,
    ))
    .unwrap()
});

/// Replace every C/C++ comment in `source` by a single space.
pub fn filter_comments(source: &str) -> String {
    RE_COMMENT_OR_LITERAL
        .replace_all(source, |caps: &Captures| {
            let matched = &caps[0];
            if matched.starts_with('/') {
                " ".to_string()
            } else {
                matched.to_string()
            }
        })
        .into_owned()
}
