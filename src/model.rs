//! Data model shared by the generators and aggregators.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A documented header, as handed over by the build system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFile {
    /// Absolute path, also the identity of the header.
    pub path: PathBuf,
}

impl HeaderFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path with forward slashes, used for every string-level transform.
    pub fn posix(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// "core/include/Foo.hpp" → "Foo"
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// "core/include/Foo.hpp" → "Foo.hpp"
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

/// Kind of a compound, read from the `kind` attribute of `<compounddef>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    Class,
    Struct,
    File,
    Namespace,
    /// Anything else the extractor emits (unions, groups, pages...).
    Other,
}

impl CompoundKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "class" => CompoundKind::Class,
            "struct" => CompoundKind::Struct,
            "file" => CompoundKind::File,
            "namespace" => CompoundKind::Namespace,
            _ => CompoundKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundKind::Class => "class",
            CompoundKind::Struct => "struct",
            CompoundKind::File => "file",
            CompoundKind::Namespace => "namespace",
            CompoundKind::Other => "other",
        }
    }

    /// "Class" / "Struct", used in page titles.
    pub fn title(&self) -> &'static str {
        match self {
            CompoundKind::Class => "Class",
            CompoundKind::Struct => "Struct",
            CompoundKind::File => "File",
            CompoundKind::Namespace => "Namespace",
            CompoundKind::Other => "Other",
        }
    }
}

/// One `<compounddef>` from an extractor XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub name: String,
    pub kind: CompoundKind,
    /// Brief description, possibly empty.
    pub brief: String,
}

/// Short descriptions keyed by display name (class name or bare file name).
///
/// Filled while the entity pages of one component are generated, then
/// handed read-only to the aggregators. Lookups never fail: a missing name
/// is `None` and callers pick their own fallback.
#[derive(Debug, Default, Clone)]
pub struct EntityIndex {
    entries: BTreeMap<String, String>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.entries.insert(name.into(), description.into());
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Which generator produced a page, recovered from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    ClassOrStruct,
    File,
    Listing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names() {
        let h = HeaderFile::new("/src/core/include/Foo.hpp");
        assert_eq!(h.stem(), "Foo");
        assert_eq!(h.file_name(), "Foo.hpp");
        assert_eq!(h.posix(), "/src/core/include/Foo.hpp");
    }

    #[test]
    fn kind_round_trip() {
        assert_eq!(CompoundKind::parse("struct"), CompoundKind::Struct);
        assert_eq!(CompoundKind::parse("union"), CompoundKind::Other);
        assert_eq!(CompoundKind::Class.title(), "Class");
    }

    #[test]
    fn index_lookup_miss_is_none() {
        let mut index = EntityIndex::new();
        index.insert("Foo", "A foo.");
        assert_eq!(index.description("Foo"), Some("A foo."));
        assert_eq!(index.description("Bar"), None);
        assert_eq!(index.len(), 1);
    }
}
