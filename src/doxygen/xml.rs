//! Reader for extractor XML compound documents.

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::model::{Compound, CompoundKind};

static RE_FORMULA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(<formula\b[^>]*>)(.*?)(</formula>)").unwrap());

/// Escape bare `.` characters inside `<formula>` markup.
///
/// The extractor sometimes emits formulas whose periods break later stages.
/// A `.` already preceded by a backslash is left alone.
pub fn escape_formula_dots(xml: &str) -> String {
    RE_FORMULA
        .replace_all(xml, |caps: &Captures| {
            let mut body = String::with_capacity(caps[2].len());
            let mut prev = None;
            for c in caps[2].chars() {
                if c == '.' && prev != Some('\\') {
                    body.push('\\');
                }
                body.push(c);
                prev = Some(c);
            }
            format!("{}{}{}", &caps[1], body, &caps[3])
        })
        .into_owned()
}

/// Read every compound of the XML document at `path`.
pub fn read_compounds(path: &Path) -> Result<Vec<Compound>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let text = escape_formula_dots(&raw);
    parse_compounds(&text).with_context(|| format!("malformed XML in {}", path.display()))
}

/// Which part of a `<compounddef>` we are collecting text for.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Name,
    Brief,
}

/// Parse all top-level `<compounddef>` elements out of an XML document.
pub fn parse_compounds(text: &str) -> Result<Vec<Compound>> {
    let mut reader = Reader::from_str(text);
    let mut compounds = Vec::new();

    // Only direct children of a compounddef count; nested ones (inner
    // classes in member lists) carry their own names.
    let mut current: Option<(CompoundKind, String, String)> = None;
    let mut depth_in_compound = 0usize;
    let mut field = Field::None;
    let mut field_depth = 0usize;
    // Elements opened anywhere in the document and not yet closed.
    let mut open = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                open += 1;
                if current.is_none() {
                    if e.name().as_ref() == b"compounddef" {
                        current = Some((kind_of(&e)?, String::new(), String::new()));
                        depth_in_compound = 0;
                    }
                    continue;
                }
                depth_in_compound += 1;
                if field == Field::None && depth_in_compound == 1 {
                    field = match e.name().as_ref() {
                        b"compoundname" => Field::Name,
                        b"briefdescription" => Field::Brief,
                        _ => Field::None,
                    };
                    field_depth = depth_in_compound;
                }
            }
            Event::Empty(e) => {
                if current.is_none() && e.name().as_ref() == b"compounddef" {
                    compounds.push(Compound {
                        name: String::new(),
                        kind: kind_of(&e)?,
                        brief: String::new(),
                    });
                }
            }
            Event::Text(t) => {
                if let Some((_, name, brief)) = current.as_mut() {
                    let text = t.unescape()?;
                    match field {
                        Field::Name => name.push_str(&text),
                        Field::Brief => brief.push_str(&text),
                        Field::None => {}
                    }
                }
            }
            Event::CData(t) => {
                if let (Some((_, _, brief)), Field::Brief) = (current.as_mut(), field) {
                    brief.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(e) => {
                open = open.saturating_sub(1);
                if current.is_none() {
                    continue;
                }
                if depth_in_compound == 0 && e.name().as_ref() == b"compounddef" {
                    if let Some((kind, name, brief)) = current.take() {
                        compounds.push(Compound {
                            name: name.trim().to_string(),
                            kind,
                            brief: collapse_whitespace(&brief),
                        });
                    }
                    continue;
                }
                if field != Field::None && depth_in_compound == field_depth {
                    field = Field::None;
                }
                depth_in_compound = depth_in_compound.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        bail!("unterminated <compounddef>");
    }
    if open != 0 {
        bail!("document truncated: {} element(s) left open", open);
    }

    Ok(compounds)
}

fn kind_of(e: &BytesStart) -> Result<CompoundKind> {
    let kind = match e.try_get_attribute("kind")? {
        Some(attr) => attr.unescape_value()?.to_string(),
        None => String::new(),
    };
    Ok(CompoundKind::parse(&kind))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="classFoo" kind="class" language="C++" prot="public">
    <compoundname>Foo</compoundname>
    <includes refid="Foo_8hpp" local="no">Foo.hpp</includes>
    <briefdescription>
<para>A foo. </para>
    </briefdescription>
    <detaileddescription>
<para>Longer text &amp; more.</para>
    </detaileddescription>
  </compounddef>
</doxygen>
"#;

    #[test]
    fn reads_class_compound() {
        let compounds = parse_compounds(CLASS_XML).unwrap();
        assert_eq!(
            compounds,
            vec![Compound {
                name: "Foo".to_string(),
                kind: CompoundKind::Class,
                brief: "A foo.".to_string(),
            }]
        );
    }

    #[test]
    fn reads_several_compounds() {
        let xml = r#"<doxygen>
  <compounddef kind="file"><compoundname>Foo.hpp</compoundname>
    <innerclass refid="classFoo">Foo</innerclass>
    <briefdescription><para>Foo &lt;header&gt;</para></briefdescription>
  </compounddef>
  <compounddef kind="namespace"><compoundname>foo</compoundname>
    <briefdescription></briefdescription>
  </compounddef>
</doxygen>"#;
        let compounds = parse_compounds(xml).unwrap();
        assert_eq!(compounds.len(), 2);
        assert_eq!(compounds[0].kind, CompoundKind::File);
        assert_eq!(compounds[0].name, "Foo.hpp");
        assert_eq!(compounds[0].brief, "Foo <header>");
        assert_eq!(compounds[1].kind, CompoundKind::Namespace);
        assert_eq!(compounds[1].brief, "");
    }

    #[test]
    fn brief_spanning_markup() {
        let xml = r#"<doxygen><compounddef kind="struct"><compoundname>Bar</compoundname>
<briefdescription><para>Uses <ref refid="classFoo">Foo</ref>  twice.</para></briefdescription>
</compounddef></doxygen>"#;
        let compounds = parse_compounds(xml).unwrap();
        assert_eq!(compounds[0].brief, "Uses Foo twice.");

        let xml = r#"<doxygen><compounddef kind="class"><compoundname>Foo</compoundname>
<briefdescription><para>Wraps <ref refid="classBar">Bar</ref>, see <computeroutput>run</computeroutput>.</para></briefdescription>
</compounddef></doxygen>"#;
        let compounds = parse_compounds(xml).unwrap();
        assert_eq!(compounds[0].brief, "Wraps Bar, see run.");
    }

    #[test]
    fn nested_briefdescription_is_ignored() {
        let xml = r#"<doxygen><compounddef kind="class"><compoundname>Foo</compoundname>
<sectiondef><memberdef><name>run</name><briefdescription><para>Member.</para></briefdescription></memberdef></sectiondef>
<briefdescription><para>Outer.</para></briefdescription>
</compounddef></doxygen>"#;
        let compounds = parse_compounds(xml).unwrap();
        assert_eq!(compounds[0].brief, "Outer.");
    }

    #[test]
    fn mismatched_tags_fail() {
        let xml = "<doxygen><compounddef kind=\"class\"><compoundname>Foo</oops></compounddef></doxygen>";
        assert!(parse_compounds(xml).is_err());
    }

    #[test]
    fn truncated_document_fails() {
        let xml = r#"<doxygen><compounddef kind="class"><compoundname>Foo</compoundname></compounddef>"#;
        let err = parse_compounds(xml).unwrap_err();
        assert!(err.to_string().contains("truncated"));

        let xml = r#"<doxygen><compounddef kind="class"><compoundname>Foo</compoundname>"#;
        let err = parse_compounds(xml).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn formula_dots_escaped() {
        let xml = r#"<para>see <formula id="0">$a.b \. c$</formula> end.</para>"#;
        assert_eq!(
            escape_formula_dots(xml),
            r#"<para>see <formula id="0">$a\.b \. c$</formula> end.</para>"#
        );
    }

    #[test]
    fn formula_escape_is_per_span() {
        let xml = "<formula id=\"1\">x.y</formula> a.b <formula id=\"2\">1.5</formula>";
        assert_eq!(
            escape_formula_dots(xml),
            "<formula id=\"1\">x\\.y</formula> a.b <formula id=\"2\">1\\.5</formula>"
        );
    }
}
