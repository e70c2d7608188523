//! JSON fragment parser

use crate::error::LoadError;
use crate::parsers::FragmentParser;
use swatch_core::{FragmentKind, ThemeFragment};

/// Parser for `.json` fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl FragmentParser for JsonParser {
    fn parse(
        &self,
        kind: FragmentKind,
        label: &str,
        content: &str,
    ) -> Result<ThemeFragment, LoadError> {
        Ok(ThemeFragment::from_json(kind, label, content)?)
    }

    fn format(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn priority(&self) -> i32 {
        10
    }
}
