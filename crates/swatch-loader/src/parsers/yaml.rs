//! YAML fragment parser
//!
//! YAML is read straight into a JSON tree. Mappings with non-string keys
//! are rejected as syntax errors.

use crate::error::LoadError;
use crate::parsers::FragmentParser;
use serde_json::Value;
use swatch_core::{FragmentError, FragmentKind, ThemeFragment};

/// Parser for `.yaml` and `.yml` fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl FragmentParser for YamlParser {
    fn parse(
        &self,
        kind: FragmentKind,
        label: &str,
        content: &str,
    ) -> Result<ThemeFragment, LoadError> {
        // An empty document is an empty fragment, not `null`
        if content.trim().is_empty() {
            return Ok(ThemeFragment::empty(kind, label));
        }
        let value: Value = serde_yaml::from_str(content).map_err(|e| FragmentError::Syntax {
            label: label.to_string(),
            message: e.to_string(),
        })?;
        Ok(ThemeFragment::new(kind, label, value)?)
    }

    fn format(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
