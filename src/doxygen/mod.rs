//! Everything that knows about the extractor: its configuration file, the
//! names it gives to XML documents, and the documents themselves.

pub mod config;
pub mod xml;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::HeaderFile;

/// Split a CMake list ("a.hpp;b.hpp;;c.hpp") into its items.
pub fn parse_cmake_list(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Escape a name the way the extractor does when building file names.
///
/// With `case_sense` off, uppercase letters become `_` plus the lowercase
/// letter, so "Foo" → "_foo".
pub fn escape_name(name: &str, case_sense: bool) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    for c in name.chars() {
        match c {
            '_' => out.push_str("__"),
            '.' => out.push_str("_8"),
            ':' => out.push_str("_1"),
            '/' => out.push_str("_2"),
            '<' => out.push_str("_3"),
            '>' => out.push_str("_4"),
            '*' => out.push_str("_5"),
            '&' => out.push_str("_6"),
            '|' => out.push_str("_7"),
            '!' => out.push_str("_9"),
            ',' => out.push_str("_00"),
            ' ' => out.push_str("_01"),
            c if !case_sense && c.is_ascii_uppercase() => {
                out.push('_');
                out.push(c.to_ascii_lowercase());
            }
            c => out.push(c),
        }
    }
    out
}

/// File stems (no extension) the extractor may have used for `header`.
fn candidate_stems(header: &HeaderFile, case_sense: bool) -> Vec<String> {
    let stem = escape_name(&header.stem(), case_sense);
    vec![
        format!("class{}", stem),
        format!("struct{}", stem),
        format!("namespace{}", stem),
        escape_name(&header.file_name(), case_sense),
    ]
}

/// List the XML documents produced for `header`, sorted by file name.
///
/// An empty result is not an error: the header simply had nothing
/// documented.
pub fn xml_files_for(header: &HeaderFile, xml_dir: &Path, case_sense: bool) -> Result<Vec<PathBuf>> {
    let candidates = candidate_stems(header, case_sense);
    // Names written without case folding, tried when matching is insensitive.
    let unfolded = candidate_stems(header, true);

    let entries = fs::read_dir(xml_dir)
        .with_context(|| format!("failed to read XML directory: {}", xml_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("xml") || !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let matched = candidates.iter().any(|c| c == stem)
            || (!case_sense && unfolded.iter().any(|c| c.eq_ignore_ascii_case(stem)));
        if matched {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cmake_list() {
        assert_eq!(
            parse_cmake_list("/a/b.hpp; /a/c.hpp;;"),
            vec!["/a/b.hpp".to_string(), "/a/c.hpp".to_string()]
        );
        assert!(parse_cmake_list("").is_empty());
    }

    #[test]
    fn escape_case_sensitive() {
        assert_eq!(escape_name("Foo.hpp", true), "Foo_8hpp");
        assert_eq!(escape_name("my_lib.h", true), "my__lib_8h");
    }

    #[test]
    fn escape_case_insensitive() {
        assert_eq!(escape_name("FooBar.hpp", false), "_foo_bar_8hpp");
    }

    #[test]
    fn finds_documents_for_header() {
        let dir = TempDir::new().unwrap();
        for name in ["classFoo.xml", "Foo_8hpp.xml", "classFooBar.xml", "namespacefoo.xml", "index.xml"] {
            fs::write(dir.path().join(name), "<doxygen/>").unwrap();
        }
        let header = HeaderFile::new("/src/Foo.hpp");
        let files = xml_files_for(&header, dir.path(), true).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Foo_8hpp.xml", "classFoo.xml"]);
    }

    #[test]
    fn case_insensitive_documents() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("class_foo.xml"), "<doxygen/>").unwrap();
        fs::write(dir.path().join("structfoo.xml"), "<doxygen/>").unwrap();
        let header = HeaderFile::new("/src/Foo.hpp");

        let files = xml_files_for(&header, dir.path(), false).unwrap();
        assert_eq!(files.len(), 2);

        let files = xml_files_for(&header, dir.path(), true).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_xml_dir_is_an_error() {
        let header = HeaderFile::new("/src/Foo.hpp");
        assert!(xml_files_for(&header, Path::new("/nonexistent/xml"), true).is_err());
    }
}
