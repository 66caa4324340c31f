//! Per-component tables of contents, built from the pages already on disk.
//!
//! Pages are found by file-name pattern and ordered by file name, which is
//! what makes reruns produce identical output.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::model::{EntityIndex, PageKind};
use crate::render::{anchor, heading, indent, title_case, write_page, PAGE_EXT};

/// Generated pages of one component, grouped by kind.
#[derive(Debug, Default)]
pub struct PageSet {
    /// `class*` and `struct*` pages.
    pub classes: Vec<PathBuf>,
    /// `file_*` pages.
    pub files: Vec<PathBuf>,
    /// `pgm_*` pages.
    pub listings: Vec<PathBuf>,
}

impl PageSet {
    /// Collect the pages in `dir`.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut classes = glob_pages(dir, "class*")?;
        classes.extend(glob_pages(dir, "struct*")?);
        classes.sort();
        Ok(Self {
            classes,
            files: glob_pages(dir, "file_*")?,
            listings: glob_pages(dir, "pgm_*")?,
        })
    }

    /// Class, struct and file pages together, in file-name order.
    pub fn entities(&self) -> Vec<PathBuf> {
        let mut all: Vec<PathBuf> = self.classes.iter().chain(&self.files).cloned().collect();
        all.sort();
        all
    }
}

fn glob_pages(dir: &Path, prefix_pattern: &str) -> Result<Vec<PathBuf>> {
    let dir_pattern = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/{}.{}", dir_pattern, prefix_pattern, PAGE_EXT);
    let mut pages: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    pages.sort();
    Ok(pages)
}

/// Kind of a generated page, from its file stem.
///
/// `class` and `struct` anywhere in the stem win over the `file_` prefix, so
/// a header whose name contains "class" is listed as a class.
pub fn classify(stem: &str) -> Option<PageKind> {
    if stem.contains("class") || stem.contains("struct") {
        Some(PageKind::ClassOrStruct)
    } else if stem.contains("file_") {
        Some(PageKind::File)
    } else if stem.starts_with("pgm_") {
        Some(PageKind::Listing)
    } else {
        None
    }
}

/// Root of a component's pages inside the documentation tree.
pub fn doc_root(component: &str) -> String {
    format!("/reference/cpp/{}/", component)
}

fn page_stem(page: &Path) -> String {
    page.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// One list entry for a class, struct or file page.
fn collection_entry(stem: &str, index: &EntityIndex, root: &str) -> Option<String> {
    let (display, text) = match classify(stem)? {
        PageKind::ClassOrStruct => {
            let keyword = if stem.contains("class") { "class" } else { "struct" };
            let name = stem.rsplit(keyword).next().unwrap_or(stem).to_string();
            let text = format!("* :class:`{}` : ", name);
            (name, text)
        }
        PageKind::File => {
            let name = stem.rsplit("file_").next().unwrap_or(stem).replace('_', ".");
            let text = format!("* :doc:`{}<{}{}>` : ", name, root, stem);
            (name, text)
        }
        PageKind::Listing => return None,
    };
    let description = index.description(&display).unwrap_or("");
    Some(format!("{}{}\n", text, description))
}

/// Table of contents over class/struct/file pages, with short descriptions.
pub fn render_collection(
    pages: &[PathBuf],
    index: &EntityIndex,
    component: &str,
    subtitle: Option<&str>,
) -> String {
    let root = doc_root(component);
    let mut out = subtitle.map(|s| heading(s, '-')).unwrap_or_default();
    for page in pages {
        let stem = page_stem(page);
        match collection_entry(&stem, index, &root) {
            Some(entry) => out.push_str(&entry),
            None => tracing::debug!(page = %page.display(), "not an entity page, skipped"),
        }
    }
    out.push_str("\n\n");
    out
}

/// Header path shown for a listing page.
///
/// "pgm_kernel_src_Foo_hpp" → "src/Foo.hpp": the `pgm` prefix and the first
/// directory are dropped and the last `_` becomes the extension dot.
pub fn listing_title(stem: &str) -> String {
    let parts: Vec<&str> = stem.split('_').collect();
    let last = parts.last().copied().unwrap_or_default();
    let middle = if parts.len() > 3 {
        parts[2..parts.len() - 1].join("/")
    } else {
        String::new()
    };
    format!("{}.{}", middle, last)
}

/// Table of contents over the program listings of a component.
pub fn render_listing_index(pages: &[PathBuf], component: &str) -> String {
    let root = doc_root(component);
    let mut out = anchor(&format!("{}_pgm_listings", component));
    out.push_str(&heading(&format!("{} programs listings", title_case(component)), '-'));
    out.push_str(".. toctree::\n    :maxdepth: 2\n\n");
    for page in pages {
        let stem = page_stem(page);
        let entry = format!("{}<{}{}>\n", listing_title(&stem), root, stem);
        out.push_str(&indent(&entry, "    "));
    }
    out
}

/// Write `autodoc_all`, `autodoc_classes`, `autodoc_files` and `autodoc_pgm`
/// for the component whose pages live in `dir`.
pub fn write_component_indexes(dir: &Path, component: &str, index: &EntityIndex) -> Result<PageSet> {
    let pages = PageSet::scan(dir)?;

    let page_path = |name: &str| dir.join(format!("{}.{}", name, PAGE_EXT));

    write_page(
        &page_path("autodoc_all"),
        &render_collection(&pages.entities(), index, component, None),
    )?;
    write_page(
        &page_path("autodoc_classes"),
        &render_collection(&pages.classes, index, component, Some("Classes and structs")),
    )?;
    write_page(
        &page_path("autodoc_files"),
        &render_collection(&pages.files, index, component, Some("Files documentation")),
    )?;
    write_page(
        &page_path("autodoc_pgm"),
        &render_listing_index(&pages.listings, component),
    )?;

    tracing::info!(
        component,
        classes = pages.classes.len(),
        files = pages.files.len(),
        listings = pages.listings.len(),
        "wrote component tables of contents"
    );
    Ok(pages)
}
