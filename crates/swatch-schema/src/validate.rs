//! Structural validation of merged theme objects
//!
//! The schema is almost entirely optional. Where a field is present it must
//! have the right shape, and every violation is collected so callers can
//! surface them all at once. Values are never coerced.

use crate::theme::{AssembledTheme, Layout, Section, TokenGroup};
use serde_json::{Map, Value};
use std::fmt;
use swatch_core::{json_type_name, TokenPath};

/// What went wrong at one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Value has the wrong JSON type
    WrongType {
        /// Type the schema requires
        expected: &'static str,
        /// Type found
        found: &'static str,
    },

    /// Required field is absent
    Missing,

    /// String is present but blank
    Empty,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::Missing => f.write_str("required field is missing"),
            Self::Empty => f.write_str("must not be empty"),
        }
    }
}

/// One schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending field
    pub path: TokenPath,
    /// Nature of the violation
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Validation failure carrying every violation found
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} schema violation(s): {}", .violations.len(), join(.violations))]
pub struct SchemaError {
    violations: Vec<Violation>,
}

impl SchemaError {
    /// All violations, in document order
    #[inline]
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Offending paths as dotted strings
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.path.to_string()).collect()
    }

    /// Whether `path` (dotted) is among the violations
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path.to_string() == path)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a merged theme object
///
/// # Errors
/// Returns [`SchemaError`] listing every violation if any field has the
/// wrong shape
pub fn validate(value: &Value) -> Result<AssembledTheme, SchemaError> {
    let mut validator = Validator::default();
    let theme = validator.theme(value);

    if validator.violations.is_empty() {
        Ok(theme)
    } else {
        Err(SchemaError {
            violations: validator.violations,
        })
    }
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    fn report(&mut self, path: TokenPath, kind: ViolationKind) {
        self.violations.push(Violation { path, kind });
    }

    fn wrong_type(&mut self, path: TokenPath, expected: &'static str, found: &Value) {
        self.report(
            path,
            ViolationKind::WrongType {
                expected,
                found: json_type_name(found),
            },
        );
    }

    fn object<'v>(&mut self, path: &TokenPath, value: &'v Value) -> Option<&'v Map<String, Value>> {
        if let Value::Object(map) = value {
            Some(map)
        } else {
            self.wrong_type(path.clone(), "object", value);
            None
        }
    }

    fn theme(&mut self, value: &Value) -> AssembledTheme {
        let root = TokenPath::root();
        let Some(map) = self.object(&root, value) else {
            return AssembledTheme::default();
        };

        let mut theme = AssembledTheme::default();
        for (key, child) in map {
            let path = root.child(key.as_str());
            match key.as_str() {
                "colors" => theme.colors = self.token_group(&path, child),
                "fonts" => theme.fonts = self.token_group(&path, child),
                "geometry" => theme.geometry = self.token_group(&path, child),
                "layout" => theme.layout = self.layout(&path, child),
                _ => tracing::debug!(%path, "stripping unknown theme group"),
            }
        }
        theme
    }

    fn token_group(&mut self, path: &TokenPath, value: &Value) -> Option<TokenGroup> {
        let map = self.object(path, value)?;
        let mut group = TokenGroup::new();
        for (name, token) in map {
            match token {
                Value::String(s) => {
                    group.insert(name.clone(), s.clone());
                }
                other => self.wrong_type(path.child(name.as_str()), "string", other),
            }
        }
        Some(group)
    }

    fn layout(&mut self, path: &TokenPath, value: &Value) -> Option<Layout> {
        let map = self.object(path, value)?;
        let mut layout = Layout::default();
        for (key, child) in map {
            let child_path = path.child(key.as_str());
            if key == "sections" {
                layout.sections = self.sections(&child_path, child);
            } else {
                tracing::debug!(path = %child_path, "stripping unknown layout key");
            }
        }
        Some(layout)
    }

    fn sections(&mut self, path: &TokenPath, value: &Value) -> Option<Vec<Section>> {
        let Value::Array(items) = value else {
            self.wrong_type(path.clone(), "array", value);
            return None;
        };

        let sections: Vec<_> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.section(&path.index(i), item))
            .collect();
        Some(sections)
    }

    fn section(&mut self, path: &TokenPath, value: &Value) -> Option<Section> {
        let map = self.object(path, value)?;
        let name_path = path.child("name");
        match map.get("name") {
            None => {
                self.report(name_path, ViolationKind::Missing);
                None
            }
            Some(Value::String(name)) if name.trim().is_empty() => {
                self.report(name_path, ViolationKind::Empty);
                None
            }
            Some(Value::String(name)) => Some(Section::new(name.clone())),
            Some(other) => {
                self.wrong_type(name_path, "string", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::GroupKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_object_is_valid_and_empty() {
        let theme = validate(&json!({})).unwrap();
        assert!(theme.is_empty());
    }

    #[test]
    fn valid_theme_is_typed() {
        let theme = validate(&json!({
            "colors": {"primary": "10 90% 50%"},
            "fonts": {"sans": "Inter, sans-serif"},
            "geometry": {"radius": "0.5rem"},
            "layout": {"sections": [{"name": "hero"}, {"name": "footer"}]}
        }))
        .unwrap();

        assert_eq!(theme.color("primary"), Some("10 90% 50%"));
        assert_eq!(theme.font("sans"), Some("Inter, sans-serif"));
        assert_eq!(theme.token(GroupKind::Geometry, "radius"), Some("0.5rem"));
        assert_eq!(
            theme.layout.as_ref().unwrap().section_names(),
            vec!["hero", "footer"]
        );
    }

    #[test]
    fn number_is_not_coerced_to_string() {
        let err = validate(&json!({"colors": {"primary": 123}})).unwrap_err();

        assert_eq!(err.paths(), vec!["colors.primary"]);
        assert_eq!(
            err.violations()[0].kind,
            ViolationKind::WrongType {
                expected: "string",
                found: "number"
            }
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let err = validate(&json!({
            "colors": {"primary": 1, "accent": "ok", "border": null},
            "fonts": "Inter",
            "geometry": {"radius": ["0.5rem"]},
            "layout": {"sections": [{"name": "hero"}, {}, {"name": 7}, "footer", {"name": "  "}]}
        }))
        .unwrap_err();

        assert_eq!(
            err.paths(),
            vec![
                "colors.primary",
                "colors.border",
                "fonts",
                "geometry.radius",
                "layout.sections.1.name",
                "layout.sections.2.name",
                "layout.sections.3",
                "layout.sections.4.name",
            ]
        );
        assert!(err.to_string().starts_with("8 schema violation(s): colors.primary: expected string, found number"));
    }

    #[test]
    fn sections_must_be_a_list() {
        let err = validate(&json!({"layout": {"sections": {"name": "hero"}}})).unwrap_err();
        assert!(err.contains_path("layout.sections"));
        assert_eq!(
            err.violations()[0].kind,
            ViolationKind::WrongType {
                expected: "array",
                found: "object"
            }
        );
    }

    #[test]
    fn root_must_be_an_object() {
        let err = validate(&json!("dark")).unwrap_err();
        assert_eq!(err.paths(), vec!["<root>"]);
    }

    #[test]
    fn unknown_keys_are_stripped() {
        let theme = validate(&json!({
            "colors": {"primary": "1 1% 1%"},
            "animations": {"fade": 200},
            "layout": {"columns": 3, "sections": [{"name": "hero", "visible": true}]}
        }))
        .unwrap();

        assert_eq!(
            theme.to_value(),
            json!({
                "colors": {"primary": "1 1% 1%"},
                "layout": {"sections": [{"name": "hero"}]}
            })
        );
    }

    #[test]
    fn round_trips_through_to_value() {
        let source = json!({
            "colors": {"accent": "3 3% 3%", "primary": "1 1% 1%"},
            "layout": {"sections": [{"name": "b"}, {"name": "a"}]}
        });
        let theme = validate(&source).unwrap();
        assert_eq!(validate(&theme.to_value()).unwrap(), theme);
    }
}
