//! Entity pages: one per documented class, struct or file.

use crate::model::CompoundKind;
use crate::render::{anchor, heading};

/// Page for a class or struct.
///
/// `label` is the reference label of the defining header, used to link to
/// its program listing.
pub fn render_class(kind: CompoundKind, name: &str, label: &str, component: &str) -> String {
    let kind_name = kind.as_str();
    let mut out = anchor(&format!("{}_{}", kind_name, name));
    out.push_str(&heading(&format!("{} {}", kind.title(), name), '-'));
    out.push_str(&format!("Defined in :ref:`pgm{}`\n\n", label));
    out.push_str(&format!(".. doxygen{}:: {}\n", kind_name, name));
    out.push_str(&format!("     :project: {}\n", component));
    out.push('\n');
    out
}

/// Page for a header file, `relative` being its path below the source root.
pub fn render_file(relative: &str, label: &str, component: &str) -> String {
    let mut out = anchor(&format!("file{}", label));
    out.push_str(&heading(&format!("File {}", relative), '-'));
    out.push_str(&format!(
        ":ref:`Go to the source code of this file <pgm{}>`\n\n",
        label
    ));
    out.push_str(&format!(".. doxygenfile:: {}\n", relative));
    out.push_str(&format!("     :project: {}\n", component));
    out.push('\n');
    out
}
