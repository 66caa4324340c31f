//! Cross-reference labels derived from header paths.
//!
//! The labels are the link format between generated pages: a file page is
//! anchored at `file<label>`, its program listing at `pgm<label>`, and the
//! two point at each other.

/// Reference label for a header path.
///
/// Drops everything up to the last occurrence of `root` (when `root` is not
/// empty) and turns every path separator into `_`. Underscores already in
/// the path are kept as they are.
pub fn label(path: &str, root: &str) -> String {
    let tail = if root.is_empty() {
        path
    } else {
        after_root(path, root)
    };
    tail.chars()
        .map(|c| if is_separator(c) { '_' } else { c })
        .collect()
}

/// Header path relative to the source root, as shown in page titles.
///
/// "/src/core/./include/Foo.hpp" with root "/src" → "core/include/Foo.hpp"
pub fn relative_path(path: &str, root: &str) -> String {
    let tail = if root.is_empty() {
        path
    } else {
        after_root(path, root)
    };
    let tail = tail.replace("/./", "/");
    tail.strip_prefix('/').unwrap_or(&tail).to_string()
}

/// Listing page stem: "core/include/Foo.hpp" → "pgm_core_include_Foo_hpp"
pub fn listing_stem(relative: &str) -> String {
    format!("pgm_{}", relative.replace(['/', '.'], "_"))
}

/// File page stem: "Foo.hpp" → "file_Foo_hpp"
pub fn file_page_stem(file_name: &str) -> String {
    format!("file_{}", file_name.replace('.', "_"))
}

fn after_root<'a>(path: &'a str, root: &str) -> &'a str {
    path.rsplit_once(root).map(|(_, tail)| tail).unwrap_or(path)
}

fn is_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}
