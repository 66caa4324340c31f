//! Page generation for the headers of one component.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::comments::filter_comments;
use crate::doxygen::config::ExtractorConfig;
use crate::doxygen::{self, xml};
use crate::error::DataError;
use crate::model::{CompoundKind, EntityIndex, HeaderFile};
use crate::refname;
use crate::render::collect::{self, PageSet};
use crate::render::{entity, listing, write_page, PAGE_EXT};

/// Marker the extractor puts in the XML file name of a header document
/// ("Foo.hpp" → "Foo_8hpp.xml").
const HEADER_MARKER: &str = "_8h";

/// What an extractor XML document becomes, decided by its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    ClassOrStruct,
    File,
    /// Namespaces and anything else; the file page already covers them.
    Skipped,
}

/// Classify an XML document by file name.
///
/// The name, not the content, decides. A header file whose name contains
/// "class" or "struct" is therefore read as a class document.
pub fn classify_document(file_name: &str) -> DocumentKind {
    if file_name.contains("class") || file_name.contains("struct") {
        DocumentKind::ClassOrStruct
    } else if file_name.contains(HEADER_MARKER) {
        DocumentKind::File
    } else {
        DocumentKind::Skipped
    }
}

/// Directory receiving the pages of `component` below the documentation root.
pub fn component_dir(docs_root: &Path, component: &str) -> PathBuf {
    docs_root.join("reference").join("cpp").join(component)
}

/// Settings shared by every header of one component.
#[derive(Debug, Clone)]
pub struct ComponentJob<'a> {
    pub component: &'a str,
    /// Absolute source root, stripped from header paths.
    pub source_root: &'a str,
    /// Where pages are written; see [`component_dir`].
    pub output_dir: PathBuf,
    pub extractor: &'a ExtractorConfig,
    /// Strip comments from program listings.
    pub filter_comments: bool,
}

/// Generate every page for `headers`, then the component's tables of
/// contents. The index lives for this call only.
pub fn generate_component(headers: &[HeaderFile], job: &ComponentJob) -> Result<PageSet> {
    fs::create_dir_all(&job.output_dir).with_context(|| {
        format!("failed to create output directory: {}", job.output_dir.display())
    })?;
    tracing::info!(
        component = job.component,
        headers = headers.len(),
        output = %job.output_dir.display(),
        "generating pages"
    );

    let mut index = EntityIndex::new();
    for header in headers {
        generate_header(header, job, &mut index)
            .with_context(|| format!("failed to document {}", header.path.display()))?;
    }

    tracing::debug!(entries = index.len(), "entity index built");
    collect::write_component_indexes(&job.output_dir, job.component, &index)
}

/// Write the entity pages and the program listing of one header, recording
/// short descriptions in `index`.
pub fn generate_header(header: &HeaderFile, job: &ComponentJob, index: &mut EntityIndex) -> Result<()> {
    let documents = doxygen::xml_files_for(
        header,
        &job.extractor.xml_dir,
        job.extractor.case_sense_names,
    )?;
    if documents.is_empty() {
        tracing::warn!(header = %header.path.display(), "no XML documents, only the listing is generated");
    }

    for document in &documents {
        write_entity_page(header, document, job, index)?;
    }

    generate_listing(header, job.source_root, &job.output_dir, job.filter_comments)?;
    Ok(())
}

fn write_entity_page(
    header: &HeaderFile,
    document: &Path,
    job: &ComponentJob,
    index: &mut EntityIndex,
) -> Result<()> {
    let compounds = xml::read_compounds(document)?;
    let file_name = document
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let header_path = header.posix();
    let label = refname::label(&header_path, job.source_root);

    let (page_name, content) = match classify_document(&file_name) {
        DocumentKind::ClassOrStruct => {
            if compounds.len() != 1 {
                return Err(DataError::MultipleCompounds {
                    kind: "class/struct",
                    found: compounds.len(),
                })
                .with_context(|| format!("in {}", document.display()));
            }
            let compound = &compounds[0];
            if !matches!(compound.kind, CompoundKind::Class | CompoundKind::Struct) {
                return Err(DataError::UnexpectedKind {
                    name: compound.name.clone(),
                    found: compound.kind.as_str().to_string(),
                })
                .with_context(|| format!("in {}", document.display()));
            }
            index.insert(compound.name.clone(), compound.brief.clone());
            (
                format!("{}{}", compound.kind.as_str(), header.stem()),
                entity::render_class(compound.kind, &compound.name, &label, job.component),
            )
        }
        DocumentKind::File => {
            let compound = compounds
                .first()
                .ok_or(DataError::NoCompound)
                .with_context(|| format!("in {}", document.display()))?;
            let relative = refname::relative_path(&header_path, job.source_root);
            index.insert(header.file_name(), compound.brief.clone());
            (
                refname::file_page_stem(&header.file_name()),
                entity::render_file(&relative, &label, job.component),
            )
        }
        DocumentKind::Skipped => {
            tracing::debug!(document = %document.display(), "namespace document skipped");
            return Ok(());
        }
    };

    let path = job.output_dir.join(format!("{}.{}", page_name, PAGE_EXT));
    write_page(&path, &content)
}

/// Write the program listing page of `header` into `output_dir`.
pub fn generate_listing(
    header: &HeaderFile,
    source_root: &str,
    output_dir: &Path,
    strip_comments: bool,
) -> Result<PathBuf> {
    let header_path = header.posix();
    let relative = refname::relative_path(&header_path, source_root);
    let label = refname::label(&header_path, source_root);

    let raw = fs::read_to_string(header.as_path())
        .with_context(|| format!("failed to read {}", header.path.display()))?;
    let source = if strip_comments {
        filter_comments(&raw)
    } else {
        raw
    };

    let path = output_dir.join(format!("{}.{}", refname::listing_stem(&relative), PAGE_EXT));
    write_page(&path, &listing::render_listing(&relative, &label, &source))?;
    Ok(path)
}
