//! Program listing pages: the source of a header, line-numbered.

use crate::render::{anchor, heading, indent};

/// Render the listing page for a header whose (possibly filtered) text is
/// `source`.
pub fn render_listing(relative: &str, label: &str, source: &str) -> String {
    let mut out = anchor(&format!("pgm{}", label));
    out.push_str(&heading(&format!("Program listing for file {}", relative), '='));
    out.push_str(&format!(
        "* Return to documentation for :ref:`this file<file{}>`\n\n",
        label
    ));
    out.push_str(".. code-block:: c++\n");
    out.push_str("    :linenos:\n\n");
    out.push_str(&indent(source, "    "));
    out
}
