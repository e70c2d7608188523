//! Semantic token table
//!
//! Each output style property reads one semantic token and falls back to a
//! documented literal when that token is absent.

use swatch_schema::GroupKind;

/// Output properties of an [`ImageStyle`](crate::ImageStyle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    /// Page background
    Background,
    /// Body text
    Foreground,
    /// Borders and dividers
    Border,
    /// Primary brand color
    Primary,
    /// Text on primary
    PrimaryForeground,
    /// Subdued surfaces
    MutedBackground,
    /// Subdued text
    MutedForeground,
    /// Accent surfaces
    Accent,
    /// Text on accent
    AccentForeground,
    /// Font stack
    FontFamily,
}

impl StyleProperty {
    /// Every property, in output order
    pub const ALL: [Self; 10] = [
        Self::Background,
        Self::Foreground,
        Self::Border,
        Self::Primary,
        Self::PrimaryForeground,
        Self::MutedBackground,
        Self::MutedForeground,
        Self::Accent,
        Self::AccentForeground,
        Self::FontFamily,
    ];

    /// Literal used when the token is absent or blank
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::Background => "hsl(0 0% 100%)",
            Self::Foreground => "hsl(222.2 84% 4.9%)",
            Self::Border => "hsl(214.3 31.8% 91.4%)",
            Self::Primary | Self::AccentForeground => "hsl(222.2 47.4% 11.2%)",
            Self::PrimaryForeground => "hsl(210 40% 98%)",
            Self::MutedBackground | Self::Accent => "hsl(210 40% 96.1%)",
            Self::MutedForeground => "hsl(215.4 16.3% 46.9%)",
            Self::FontFamily => "Inter, system-ui, sans-serif",
        }
    }

    /// Key in the serialized style object
    #[must_use]
    pub const fn style_key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Border => "border",
            Self::Primary => "primary",
            Self::PrimaryForeground => "primaryForeground",
            Self::MutedBackground => "mutedBackground",
            Self::MutedForeground => "mutedForeground",
            Self::Accent => "accent",
            Self::AccentForeground => "accentForeground",
            Self::FontFamily => "fontFamily",
        }
    }

    /// Whether values are colors (HSL triples get wrapped)
    #[inline]
    #[must_use]
    pub const fn is_color(self) -> bool {
        !matches!(self, Self::FontFamily)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Where one property reads its token from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSlot {
    /// Token group
    pub group: GroupKind,
    /// Token name inside the group
    pub token: String,
}

impl TokenSlot {
    fn new(group: GroupKind, token: &str) -> Self {
        Self {
            group,
            token: token.to_string(),
        }
    }
}

/// Property → semantic token table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMap {
    slots: [TokenSlot; 10],
}

impl TokenMap {
    /// Slot for a property
    #[inline]
    #[must_use]
    pub fn slot(&self, property: StyleProperty) -> &TokenSlot {
        &self.slots[property.index()]
    }

    /// Read `property` from a different token
    #[must_use]
    pub fn with_token(mut self, property: StyleProperty, group: GroupKind, token: &str) -> Self {
        self.slots[property.index()] = TokenSlot::new(group, token);
        self
    }
}

impl Default for TokenMap {
    fn default() -> Self {
        use GroupKind::{Colors, Fonts};
        Self {
            slots: [
                TokenSlot::new(Colors, "background"),
                TokenSlot::new(Colors, "foreground"),
                TokenSlot::new(Colors, "border"),
                TokenSlot::new(Colors, "primary"),
                TokenSlot::new(Colors, "primary-foreground"),
                TokenSlot::new(Colors, "muted"),
                TokenSlot::new(Colors, "muted-foreground"),
                TokenSlot::new(Colors, "accent"),
                TokenSlot::new(Colors, "accent-foreground"),
                TokenSlot::new(Fonts, "sans"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, property) in StyleProperty::ALL.iter().enumerate() {
            assert_eq!(property.index(), i);
        }
    }

    #[test]
    fn default_map_reads_semantic_tokens() {
        let map = TokenMap::default();
        assert_eq!(map.slot(StyleProperty::MutedBackground).token, "muted");
        assert_eq!(map.slot(StyleProperty::FontFamily).group, GroupKind::Fonts);
    }

    #[test]
    fn with_token_rebinds_one_slot() {
        let map = TokenMap::default().with_token(StyleProperty::FontFamily, GroupKind::Fonts, "heading");
        assert_eq!(map.slot(StyleProperty::FontFamily).token, "heading");
        assert_eq!(map.slot(StyleProperty::Primary).token, "primary");
    }

    #[test]
    fn every_default_is_non_blank() {
        for property in StyleProperty::ALL {
            assert!(!property.default_value().trim().is_empty());
        }
    }
}
