//! Project-wide C/C++ API reference page.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::{anchor, heading, title_case, write_page, PAGE_EXT};

/// Options for the project page, beyond the component order.
#[derive(Debug, Default, Clone)]
pub struct ApiPage {
    /// Project name used in the title and the top anchor.
    pub project: String,
    /// Text inserted verbatim after the introduction.
    pub preamble: String,
    /// Document holding class diagrams, linked when set.
    pub class_diagrams: Option<String>,
}

/// Components of `order` that have a non-empty directory under `cpp_dir`,
/// kept in the caller's order.
pub fn documented_components(cpp_dir: &Path, order: &[String]) -> Vec<String> {
    order
        .iter()
        .filter(|component| {
            let dir = cpp_dir.join(component.as_str());
            match fs::read_dir(&dir) {
                Ok(mut entries) => entries.next().is_some(),
                Err(_) => false,
            }
        })
        .cloned()
        .collect()
}

/// Render the project page for `components`, already filtered and ordered.
pub fn render_api(page: &ApiPage, components: &[String]) -> String {
    let mut out = anchor(&format!("{}_cpp_reference", page.project.to_lowercase()));
    out.push('\n');
    out.push_str(&heading(&format!("{} C/C++ API reference", page.project), '#'));
    out.push_str(&format!(
        "This is the documentation of C/C++ interface to {}.\n\n\n",
        page.project
    ));
    out.push_str(&page.preamble);

    if let Some(doc) = &page.class_diagrams {
        out.push_str(&heading("Class diagrams (UML view)", '='));
        out.push_str(&format!(":doc:`{}`\n\n", doc));
    }

    for component in components {
        out.push_str(&heading(&format!("{} component", title_case(component)), '='));
        out.push_str(&format!(
            "Check :ref:`{}_pgm_listings` for a complete list of headers for this component.\n\n",
            component
        ));
        out.push_str(&format!(".. include:: cpp/{}/autodoc_classes.{}\n", component, PAGE_EXT));
        out.push_str(&format!(".. include:: cpp/{}/autodoc_files.{}\n", component, PAGE_EXT));
        out.push('\n');
    }
    out
}

/// Write `cpp_api.rst` into `reference_dir`, merging the components found
/// under `reference_dir/cpp` in the order given.
pub fn write_api_page(reference_dir: &Path, order: &[String], page: &ApiPage) -> Result<PathBuf> {
    fs::create_dir_all(reference_dir)
        .with_context(|| format!("failed to create directory: {}", reference_dir.display()))?;

    let components = documented_components(&reference_dir.join("cpp"), order);
    for skipped in order.iter().filter(|c| !components.contains(c)) {
        tracing::debug!(component = %skipped, "no generated pages, skipped");
    }

    let path = reference_dir.join(format!("cpp_api.{}", PAGE_EXT));
    write_page(&path, &render_api(page, &components))?;
    tracing::info!(components = components.len(), page = %path.display(), "wrote API reference");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_caller_order_and_skips_empty() {
        let dir = TempDir::new().unwrap();
        for c in ["numerics", "kernel", "io"] {
            fs::create_dir_all(dir.path().join(c)).unwrap();
        }
        fs::write(dir.path().join("numerics/autodoc_all.rst"), "").unwrap();
        fs::write(dir.path().join("kernel/autodoc_all.rst"), "").unwrap();

        let found = documented_components(dir.path(), &names(&["kernel", "io", "missing", "numerics"]));
        assert_eq!(found, names(&["kernel", "numerics"]));
    }

    #[test]
    fn component_section() {
        let page = ApiPage {
            project: "Siconos".to_string(),
            ..Default::default()
        };
        let out = render_api(&page, &names(&["kernel"]));
        assert!(out.starts_with(".. _siconos_cpp_reference:\n\n\nSiconos C/C++ API reference\n###"));
        assert!(out.contains(
            "Kernel component\n================\n\n\
             Check :ref:`kernel_pgm_listings` for a complete list of headers for this component.\n\n\
             .. include:: cpp/kernel/autodoc_classes.rst\n\
             .. include:: cpp/kernel/autodoc_files.rst\n\n"
        ));
        assert!(!out.contains("Class diagrams"));
    }

    #[test]
    fn preamble_and_diagrams() {
        let page = ApiPage {
            project: "Demo".to_string(),
            preamble: "Read me first.\n\n".to_string(),
            class_diagrams: Some("/reference/class_diagrams".to_string()),
        };
        let out = render_api(&page, &[]);
        assert!(out.contains("interface to Demo.\n\n\nRead me first.\n\nClass diagrams (UML view)\n"));
        assert!(out.contains(":doc:`/reference/class_diagrams`\n\n"));
    }

    #[test]
    fn writes_page_when_nothing_documented() {
        let dir = TempDir::new().unwrap();
        let page = ApiPage {
            project: "Demo".to_string(),
            ..Default::default()
        };
        let path = write_api_page(dir.path(), &names(&["kernel"]), &page).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(!text.contains("component"));
    }
}
