//! reStructuredText page writers.

pub mod api;
pub mod collect;
pub mod entity;
pub mod listing;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Extension of every generated page.
pub const PAGE_EXT: &str = "rst";

/// `.. _<label>:` followed by a blank line.
pub fn anchor(label: &str) -> String {
    format!(".. _{}:\n\n", label)
}

/// A title underlined with `mark`, followed by a blank line.
pub fn heading(title: &str, mark: char) -> String {
    let underline: String = std::iter::repeat(mark).take(title.chars().count()).collect();
    format!("{}\n{}\n\n", title, underline)
}

/// Prefix every non-blank line of `text` with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// "multi body" → "Multi Body"
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Write a page, attaching the path to any I/O error.
pub fn write_page(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(page = %path.display(), "wrote page");
    Ok(())
}
