//! Typed view of an assembled theme
//!
//! Every field is optional because any fragment may be missing upstream.
//! The one structural guarantee is `layout.sections`: when present it is a
//! concrete ordered list of named sections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Token name → raw CSS value (HSL triple, length, font stack)
pub type TokenGroup = BTreeMap<String, String>;

/// The string-valued token groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// `colors`
    Colors,
    /// `fonts`
    Fonts,
    /// `geometry`
    Geometry,
}

impl GroupKind {
    /// All string-valued groups
    pub const ALL: [Self; 3] = [Self::Colors, Self::Fonts, Self::Geometry];

    /// Key of the group in the fragment object
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Fonts => "fonts",
            Self::Geometry => "geometry",
        }
    }
}

/// Fully merged and validated theme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledTheme {
    /// Color tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<TokenGroup>,
    /// Font stacks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<TokenGroup>,
    /// Radius and other lengths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<TokenGroup>,
    /// Page layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl AssembledTheme {
    /// Token group by kind
    #[inline]
    #[must_use]
    pub fn group(&self, kind: GroupKind) -> Option<&TokenGroup> {
        match kind {
            GroupKind::Colors => self.colors.as_ref(),
            GroupKind::Fonts => self.fonts.as_ref(),
            GroupKind::Geometry => self.geometry.as_ref(),
        }
    }

    /// Mutable token group by kind, created if absent
    pub fn group_mut(&mut self, kind: GroupKind) -> &mut TokenGroup {
        let slot = match kind {
            GroupKind::Colors => &mut self.colors,
            GroupKind::Fonts => &mut self.fonts,
            GroupKind::Geometry => &mut self.geometry,
        };
        slot.get_or_insert_with(TokenGroup::new)
    }

    /// Single token
    #[must_use]
    pub fn token(&self, kind: GroupKind, name: &str) -> Option<&str> {
        self.group(kind)
            .and_then(|group| group.get(name))
            .map(String::as_str)
    }

    /// Color token
    #[inline]
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&str> {
        self.token(GroupKind::Colors, name)
    }

    /// Font token
    #[inline]
    #[must_use]
    pub fn font(&self, name: &str) -> Option<&str> {
        self.token(GroupKind::Fonts, name)
    }

    /// Section list, if the layout defines one
    #[must_use]
    pub fn sections(&self) -> Option<&[Section]> {
        self.layout.as_ref()?.sections.as_deref()
    }

    /// Whether no group is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_none() && self.fonts.is_none() && self.geometry.is_none() && self.layout.is_none()
    }

    /// Back to the fragment shape, absent fields omitted
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for kind in GroupKind::ALL {
            if let Some(group) = self.group(kind) {
                let tokens = group
                    .iter()
                    .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                    .collect();
                root.insert(kind.key().to_string(), Value::Object(tokens));
            }
        }
        if let Some(layout) = &self.layout {
            let mut layout_map = Map::new();
            if let Some(sections) = &layout.sections {
                let list = sections
                    .iter()
                    .map(|section| {
                        let mut record = Map::new();
                        record.insert("name".to_string(), Value::String(section.name.clone()));
                        Value::Object(record)
                    })
                    .collect();
                layout_map.insert("sections".to_string(), Value::Array(list));
            }
            root.insert("layout".to_string(), Value::Object(layout_map));
        }
        Value::Object(root)
    }
}

/// Page layout of a campaign suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Ordered sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl Layout {
    /// Layout with the given section order
    #[must_use]
    pub fn with_sections<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: Some(names.into_iter().map(Section::new).collect()),
        }
    }

    /// Section names in order
    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flatten()
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Move the section at `from` to position `to` (drag and drop)
    ///
    /// # Errors
    /// Returns error if there are no sections or an index is out of range
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), LayoutError> {
        let sections = self.sections.as_mut().ok_or(LayoutError::NoSections)?;
        let len = sections.len();
        for index in [from, to] {
            if index >= len {
                return Err(LayoutError::OutOfRange { index, len });
            }
        }
        let section = sections.remove(from);
        sections.insert(to, section);
        Ok(())
    }

    /// Reorder sections to follow `order`
    ///
    /// Sections not named in `order` keep their relative order after the
    /// named ones.
    ///
    /// # Errors
    /// Returns error if `order` names a section that does not exist
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), LayoutError> {
        let sections = self.sections.as_mut().ok_or(LayoutError::NoSections)?;
        if let Some(unknown) = order
            .iter()
            .map(|name| name.as_ref())
            .find(|name: &&str| !sections.iter().any(|s| s.name == *name))
        {
            return Err(LayoutError::UnknownSection(unknown.to_string()));
        }

        let mut remaining = std::mem::take(sections);
        let mut ordered = Vec::with_capacity(remaining.len());
        for name in order {
            // a name listed twice was already moved
            if let Some(position) = remaining.iter().position(|s| s.name == name.as_ref()) {
                ordered.push(remaining.remove(position));
            }
        }
        ordered.append(&mut remaining);
        *sections = ordered;
        Ok(())
    }
}

/// One named page section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// Section name
    pub name: String,
}

impl Section {
    /// Create section
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Layout editing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Layout has no section list
    #[error("layout has no sections")]
    NoSections,

    /// Index past the end of the section list
    #[error("section index {index} out of range (len {len})")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Section count
        len: usize,
    },

    /// Order names a section that is not in the layout
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_theme_is_empty() {
        let theme = AssembledTheme::default();
        assert!(theme.is_empty());
        assert_eq!(theme.to_value(), json!({}));
        assert_eq!(theme.color("primary"), None);
        assert_eq!(theme.sections(), None);
    }

    #[test]
    fn token_lookup() {
        let mut theme = AssembledTheme::default();
        theme
            .group_mut(GroupKind::Colors)
            .insert("primary".to_string(), "10 90% 50%".to_string());
        theme
            .group_mut(GroupKind::Fonts)
            .insert("sans".to_string(), "Inter".to_string());

        assert_eq!(theme.color("primary"), Some("10 90% 50%"));
        assert_eq!(theme.font("sans"), Some("Inter"));
        assert_eq!(theme.token(GroupKind::Geometry, "radius"), None);
    }

    #[test]
    fn to_value_keeps_section_order() {
        let theme = AssembledTheme {
            layout: Some(Layout::with_sections(["hero", "gallery", "footer"])),
            ..AssembledTheme::default()
        };

        assert_eq!(
            theme.to_value(),
            json!({"layout": {"sections": [{"name": "hero"}, {"name": "gallery"}, {"name": "footer"}]}})
        );
    }

    #[test]
    fn move_section_forward_and_back() {
        let mut layout = Layout::with_sections(["hero", "gallery", "footer"]);

        layout.move_section(0, 2).unwrap();
        assert_eq!(layout.section_names(), vec!["gallery", "footer", "hero"]);

        layout.move_section(2, 0).unwrap();
        assert_eq!(layout.section_names(), vec!["hero", "gallery", "footer"]);
    }

    #[test]
    fn move_section_out_of_range() {
        let mut layout = Layout::with_sections(["hero"]);
        assert_eq!(
            layout.move_section(0, 3),
            Err(LayoutError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(Layout::default().move_section(0, 0), Err(LayoutError::NoSections));
    }

    #[test]
    fn reorder_puts_unlisted_sections_last() {
        let mut layout = Layout::with_sections(["hero", "gallery", "pricing", "footer"]);
        layout.reorder(&["footer", "hero"]).unwrap();
        assert_eq!(
            layout.section_names(),
            vec!["footer", "hero", "gallery", "pricing"]
        );
    }

    #[test]
    fn reorder_unknown_section_leaves_sections_intact() {
        let mut layout = Layout::with_sections(["hero", "footer"]);
        let result = layout.reorder(&["missing"]);

        assert_eq!(result, Err(LayoutError::UnknownSection("missing".to_string())));
        assert_eq!(layout.section_names(), vec!["hero", "footer"]);
    }
}
