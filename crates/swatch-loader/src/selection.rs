//! Theme selection: which presets make up a theme

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use swatch_core::{FragmentKind, PathError, ThemeFragment, TokenPath};
use swatch_schema::GroupKind;

/// Named presets plus per-token overrides
///
/// Each preset names a file in its kind's directory. Missing presets are
/// simply not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSelection {
    /// Base theme in `themes/`
    pub base: Option<String>,
    /// Color preset in `colors/`
    pub colors: Option<String>,
    /// Font preset in `fonts/`
    pub fonts: Option<String>,
    /// Radius preset in `radius/`
    pub radius: Option<String>,
    /// Token overrides, applied last
    pub overrides: Vec<TokenOverride>,
    /// Section order for the layout
    pub section_order: Option<Vec<String>>,
}

impl ThemeSelection {
    /// Empty selection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base theme
    #[inline]
    #[must_use]
    pub fn with_base(self, name: impl Into<String>) -> Self {
        self.with_preset(FragmentKind::Base, name)
    }

    /// Set the preset for a kind
    ///
    /// [`FragmentKind::Overrides`] has no preset directory and is ignored.
    #[must_use]
    pub fn with_preset(mut self, kind: FragmentKind, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        match kind {
            FragmentKind::Base => self.base = name,
            FragmentKind::Colors => self.colors = name,
            FragmentKind::Fonts => self.fonts = name,
            FragmentKind::Radius => self.radius = name,
            FragmentKind::Overrides => {}
        }
        self
    }

    /// Add a token override
    #[inline]
    #[must_use]
    pub fn with_override(mut self, token: TokenOverride) -> Self {
        self.overrides.push(token);
        self
    }

    /// Set the section order
    #[must_use]
    pub fn with_section_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Preset for a kind
    #[must_use]
    pub fn preset(&self, kind: FragmentKind) -> Option<&str> {
        match kind {
            FragmentKind::Base => self.base.as_deref(),
            FragmentKind::Colors => self.colors.as_deref(),
            FragmentKind::Fonts => self.fonts.as_deref(),
            FragmentKind::Radius => self.radius.as_deref(),
            FragmentKind::Overrides => None,
        }
    }

    /// Selected presets, lowest precedence first
    #[must_use]
    pub fn presets(&self) -> Vec<(FragmentKind, &str)> {
        FragmentKind::ALL
            .into_iter()
            .filter_map(|kind| self.preset(kind).map(|name| (kind, name)))
            .collect()
    }

    /// The overrides as one fragment; later overrides of a token win
    #[must_use]
    pub fn overrides_fragment(&self) -> ThemeFragment {
        let mut fragment = ThemeFragment::empty(FragmentKind::Overrides, "overrides");
        for token in &self.overrides {
            fragment.set(&token.path, Value::String(token.value.clone()));
        }
        fragment
    }
}

/// A single `group.token=value` override
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenOverride {
    path: TokenPath,
    value: String,
}

impl TokenOverride {
    /// Create override for `group.token`
    ///
    /// # Errors
    /// Returns error if `path` is not a token in a token group
    pub fn new(path: TokenPath, value: impl Into<String>) -> Result<Self, OverrideError> {
        let in_group = path
            .first()
            .is_some_and(|first| GroupKind::ALL.iter().any(|g| g.key() == first));
        if path.len() != 2 || !in_group {
            return Err(OverrideError::NotAToken(path.to_string()));
        }
        Ok(Self {
            path,
            value: value.into(),
        })
    }

    /// Token path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &TokenPath {
        &self.path
    }

    /// Token value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for TokenOverride {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.value)
    }
}

impl FromStr for TokenOverride {
    type Err = OverrideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, value) = s
            .split_once('=')
            .ok_or_else(|| OverrideError::MissingValue(s.to_string()))?;
        Self::new(path.parse()?, value.trim())
    }
}

impl TryFrom<String> for TokenOverride {
    type Error = OverrideError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TokenOverride> for String {
    fn from(token: TokenOverride) -> Self {
        token.to_string()
    }
}

/// Errors parsing a token override
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    /// No `=` separator
    #[error("override '{0}' must have the form group.token=value")]
    MissingValue(String),

    /// Path is malformed
    #[error(transparent)]
    Path(#[from] PathError),

    /// Path does not name a token in colors, fonts or geometry
    #[error("'{0}' is not a token path (expected colors.*, fonts.* or geometry.*)")]
    NotAToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn presets_in_precedence_order() {
        let selection = ThemeSelection::new()
            .with_preset(FragmentKind::Radius, "round")
            .with_preset(FragmentKind::Colors, "ocean")
            .with_base("default")
            .with_preset(FragmentKind::Overrides, "ignored");

        assert_eq!(
            selection.presets(),
            vec![
                (FragmentKind::Base, "default"),
                (FragmentKind::Colors, "ocean"),
                (FragmentKind::Radius, "round"),
            ]
        );
    }

    #[test]
    fn parse_override() {
        let token: TokenOverride = "colors.primary = 10 90% 50% ".parse().unwrap();
        assert_eq!(token.path().to_string(), "colors.primary");
        assert_eq!(token.value(), "10 90% 50%");
        assert_eq!(token.to_string(), "colors.primary=10 90% 50%");
    }

    #[test]
    fn override_value_may_contain_equals() {
        let token: TokenOverride = "fonts.sans=a=b".parse().unwrap();
        assert_eq!(token.value(), "a=b");
    }

    #[test]
    fn reject_bad_overrides() {
        assert!(matches!(
            "colors.primary".parse::<TokenOverride>(),
            Err(OverrideError::MissingValue(_))
        ));
        assert!(matches!(
            "colors..primary=x".parse::<TokenOverride>(),
            Err(OverrideError::Path(PathError::EmptySegment(_)))
        ));
        assert!(matches!(
            "layout.sections=x".parse::<TokenOverride>(),
            Err(OverrideError::NotAToken(_))
        ));
        assert!(matches!(
            "colors=x".parse::<TokenOverride>(),
            Err(OverrideError::NotAToken(_))
        ));
    }

    #[test]
    fn overrides_fragment_last_wins() {
        let selection = ThemeSelection::new()
            .with_override("colors.primary=1 1% 1%".parse().unwrap())
            .with_override("geometry.radius=0.5rem".parse().unwrap())
            .with_override("colors.primary=2 2% 2%".parse().unwrap());

        let fragment = selection.overrides_fragment();
        assert_eq!(fragment.kind(), FragmentKind::Overrides);
        assert_eq!(
            fragment.tokens(),
            &json!({"colors": {"primary": "2 2% 2%"}, "geometry": {"radius": "0.5rem"}})
        );
    }

    #[test]
    fn deserialize_from_toml() {
        let selection: ThemeSelection = toml::from_str(
            r#"
            base = "default"
            fonts = "serif"
            overrides = ["colors.accent=3 3% 3%"]
            section_order = ["footer", "hero"]
            "#,
        )
        .unwrap();

        assert_eq!(selection.base.as_deref(), Some("default"));
        assert_eq!(selection.fonts.as_deref(), Some("serif"));
        assert_eq!(selection.overrides[0].value(), "3 3% 3%");
        assert_eq!(selection.section_order, Some(vec!["footer".into(), "hero".into()]));
    }

    #[test]
    fn deserialize_rejects_bad_override() {
        let result: Result<ThemeSelection, _> = toml::from_str(r#"overrides = ["nope"]"#);
        assert!(result.is_err());
    }
}
