//! Fragment parsers for different file formats
//!
//! Every format parses into the same JSON tree, so a theme can mix JSON and
//! YAML fragments freely.

use crate::error::LoadError;
use std::path::Path;
use std::sync::Arc;
use swatch_core::{FragmentKind, ThemeFragment};

mod json;
mod yaml;

pub use json::JsonParser;
pub use yaml::YamlParser;

/// Parser trait for converting file content into fragments
///
/// Implement this trait to add support for new file formats.
pub trait FragmentParser: Send + Sync + 'static {
    /// Parse content string into a fragment
    ///
    /// # Errors
    /// Returns [`LoadError::Fragment`] if the content is not a fragment
    fn parse(&self, kind: FragmentKind, label: &str, content: &str)
        -> Result<ThemeFragment, LoadError>;

    /// Format name, part of the cache key
    fn format(&self) -> &'static str;

    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str];

    /// Parser priority (higher = tried first when multiple parsers match)
    fn priority(&self) -> i32 {
        0
    }
}

/// Parser registration for dynamic parser management
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn FragmentParser>>,
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parser_count", &self.parsers.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl ParserRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser
    pub fn register<P: FragmentParser>(&mut self, parser: P) {
        self.parsers.push(Arc::new(parser));
        // stable sort keeps registration order among equal priorities
        self.parsers.sort_by_key(|p| std::cmp::Reverse(p.priority()));
    }

    /// Find parser for path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn FragmentParser> {
        self.parsers.iter().find(|p| p.can_parse(path)).map(|p| &**p)
    }

    /// Get all registered extensions, in lookup order
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.parsers
            .iter()
            .flat_map(|p| p.extensions())
            .copied()
            .collect()
    }

    /// Number of registered parsers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether no parser is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Create default parser registry with built-in parsers
///
/// JSON is tried before YAML when both files exist for one preset.
#[inline]
#[must_use]
pub fn default_parsers() -> ParserRegistry {
    let mut registry = ParserRegistry::new();
    registry.register(JsonParser);
    registry.register(YamlParser);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperParser;

    impl FragmentParser for UpperParser {
        fn parse(
            &self,
            kind: FragmentKind,
            label: &str,
            content: &str,
        ) -> Result<ThemeFragment, LoadError> {
            let value = serde_json::json!({"colors": {"primary": content.trim().to_uppercase()}});
            Ok(ThemeFragment::new(kind, label, value)?)
        }

        fn format(&self) -> &'static str {
            "upper"
        }

        fn extensions(&self) -> &[&str] {
            &["txt"]
        }

        fn priority(&self) -> i32 {
            20
        }
    }

    #[test]
    fn parser_can_parse_by_extension() {
        assert!(JsonParser.can_parse(Path::new("colors/ocean.json")));
        assert!(!JsonParser.can_parse(Path::new("colors/ocean.yaml")));
        assert!(YamlParser.can_parse(Path::new("colors/ocean.yml")));
        assert!(!YamlParser.can_parse(Path::new("colors/ocean")));
    }

    #[test]
    fn default_registry_lookup() {
        let registry = default_parsers();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.all_extensions(), vec!["json", "yaml", "yml"]);

        let parser = registry.find_for_path(Path::new("themes/default.yaml")).unwrap();
        assert_eq!(parser.format(), "yaml");
        assert!(registry.find_for_path(Path::new("themes/default.toml")).is_none());
    }

    #[test]
    fn higher_priority_first() {
        let mut registry = default_parsers();
        registry.register(UpperParser);
        assert_eq!(registry.all_extensions()[0], "txt");

        let parser = registry.find_for_path(Path::new("colors/brand.txt")).unwrap();
        let fragment = parser.parse(FragmentKind::Colors, "colors/brand", "red\n").unwrap();
        assert_eq!(fragment.tokens()["colors"]["primary"], "RED");
    }

    #[test]
    fn registry_clone_shares_parsers() {
        let registry = default_parsers();
        let cloned = registry.clone();
        assert_eq!(cloned.all_extensions(), registry.all_extensions());
    }
}
