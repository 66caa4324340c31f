//! Doxyfile reader.
//!
//! Only the syntax needed to pull a few settings out of a Doxyfile:
//! `KEY = VALUE`, `KEY += VALUE`, `#` comments and `\` continuations.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(\+?=)\s*(.*?)\s*$").unwrap());

/// Raw key/value settings from a Doxyfile.
#[derive(Debug, Default, Clone)]
pub struct DoxyConfig {
    values: HashMap<String, String>,
}

impl DoxyConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read extractor config: {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut values: HashMap<String, String> = HashMap::new();
        for line in logical_lines(text) {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some(caps) = RE_ASSIGN.captures(&line) else {
                continue;
            };
            let key = caps[1].to_string();
            let value = caps[3].to_string();
            if &caps[2] == "+=" {
                let entry = values.entry(key).or_default();
                if !entry.is_empty() && !value.is_empty() {
                    entry.push(' ');
                }
                entry.push_str(&value);
            } else {
                values.insert(key, value);
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Join lines ending in a backslash with the line that follows.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for raw in text.lines() {
        let raw = raw.trim_end();
        if let Some(head) = raw.strip_suffix('\\') {
            current.push_str(head);
            current.push(' ');
        } else {
            current.push_str(raw);
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// The settings the page generator needs from the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Whether the extractor kept letter case in generated file names.
    pub case_sense_names: bool,
    /// Directory holding the XML documents.
    pub xml_dir: PathBuf,
}

impl ExtractorConfig {
    /// Derive the settings, resolving a relative output directory against
    /// `base_dir` (the directory holding the Doxyfile).
    pub fn from_doxy(config: &DoxyConfig, base_dir: &Path) -> Self {
        let case_sense_names = config
            .get("CASE_SENSE_NAMES")
            .map(|v| v.contains("YES"))
            .unwrap_or(true);
        let output_dir = unquote(config.get("OUTPUT_DIRECTORY").unwrap_or(""));
        let xml_output = match unquote(config.get("XML_OUTPUT").unwrap_or("")) {
            "" => "xml",
            v => v,
        };
        let xml_dir = Path::new(output_dir).join(xml_output);
        let xml_dir = if xml_dir.is_relative() {
            base_dir.join(xml_dir)
        } else {
            xml_dir
        };
        Self {
            case_sense_names,
            xml_dir,
        }
    }

    pub fn load(doxyfile: &Path) -> Result<Self> {
        let config = DoxyConfig::load(doxyfile)?;
        let base = doxyfile.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::from_doxy(&config, base))
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOXYFILE: &str = "\
# Project settings
PROJECT_NAME     = \"kernel\"
CASE_SENSE_NAMES = YES
OUTPUT_DIRECTORY = /build/doxygen/kernel
XML_OUTPUT       = xml
INPUT            = src/a \\
                   src/b
INPUT           += src/c
";

    #[test]
    fn parses_assignments() {
        let config = DoxyConfig::parse(DOXYFILE);
        assert_eq!(config.get("CASE_SENSE_NAMES"), Some("YES"));
        assert_eq!(config.get("PROJECT_NAME"), Some("\"kernel\""));
        assert_eq!(config.get("MISSING"), None);
    }

    #[test]
    fn joins_continuations_and_appends() {
        let config = DoxyConfig::parse(DOXYFILE);
        let input = config.get("INPUT").unwrap();
        let parts: Vec<_> = input.split_whitespace().collect();
        assert_eq!(parts, vec!["src/a", "src/b", "src/c"]);
    }

    #[test]
    fn extractor_settings() {
        let config = DoxyConfig::parse(DOXYFILE);
        let xml = ExtractorConfig::from_doxy(&config, Path::new("/ignored"));
        assert!(xml.case_sense_names);
        assert_eq!(xml.xml_dir, PathBuf::from("/build/doxygen/kernel/xml"));
    }

    #[test]
    fn extractor_defaults_and_relative_dir() {
        let config = DoxyConfig::parse("CASE_SENSE_NAMES = NO\nOUTPUT_DIRECTORY = out\n");
        let xml = ExtractorConfig::from_doxy(&config, Path::new("/docs"));
        assert!(!xml.case_sense_names);
        assert_eq!(xml.xml_dir, PathBuf::from("/docs/out/xml"));

        let xml = ExtractorConfig::from_doxy(&DoxyConfig::default(), Path::new("/docs"));
        assert!(xml.case_sense_names);
        assert_eq!(xml.xml_dir, PathBuf::from("/docs/xml"));
    }
}
