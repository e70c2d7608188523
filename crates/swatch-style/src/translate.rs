//! Theme → inline style translation for the image renderer
//!
//! Optional in, total out: every output key is always populated, from the
//! theme when it has a usable token and from the documented default
//! otherwise.

use crate::slots::{StyleProperty, TokenMap};
use serde::Serialize;
use swatch_schema::AssembledTheme;

/// Flat inline style values consumed by the static image renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    /// Page background
    pub background: String,
    /// Body text
    pub foreground: String,
    /// Borders
    pub border: String,
    /// Primary brand color
    pub primary: String,
    /// Text on primary
    pub primary_foreground: String,
    /// Subdued surfaces
    pub muted_background: String,
    /// Subdued text
    pub muted_foreground: String,
    /// Accent surfaces
    pub accent: String,
    /// Text on accent
    pub accent_foreground: String,
    /// Font stack
    pub font_family: String,
}

impl ImageStyle {
    /// Value of one property
    #[must_use]
    pub fn get(&self, property: StyleProperty) -> &str {
        match property {
            StyleProperty::Background => &self.background,
            StyleProperty::Foreground => &self.foreground,
            StyleProperty::Border => &self.border,
            StyleProperty::Primary => &self.primary,
            StyleProperty::PrimaryForeground => &self.primary_foreground,
            StyleProperty::MutedBackground => &self.muted_background,
            StyleProperty::MutedForeground => &self.muted_foreground,
            StyleProperty::Accent => &self.accent,
            StyleProperty::AccentForeground => &self.accent_foreground,
            StyleProperty::FontFamily => &self.font_family,
        }
    }

    fn slot_mut(&mut self, property: StyleProperty) -> &mut String {
        match property {
            StyleProperty::Background => &mut self.background,
            StyleProperty::Foreground => &mut self.foreground,
            StyleProperty::Border => &mut self.border,
            StyleProperty::Primary => &mut self.primary,
            StyleProperty::PrimaryForeground => &mut self.primary_foreground,
            StyleProperty::MutedBackground => &mut self.muted_background,
            StyleProperty::MutedForeground => &mut self.muted_foreground,
            StyleProperty::Accent => &mut self.accent,
            StyleProperty::AccentForeground => &mut self.accent_foreground,
            StyleProperty::FontFamily => &mut self.font_family,
        }
    }

    /// `(style key, value)` pairs in output order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        StyleProperty::ALL
            .into_iter()
            .map(move |property| (property.style_key(), self.get(property)))
    }
}

impl Default for ImageStyle {
    /// All documented fallback literals
    fn default() -> Self {
        let fallback = |property: StyleProperty| property.default_value().to_string();
        Self {
            background: fallback(StyleProperty::Background),
            foreground: fallback(StyleProperty::Foreground),
            border: fallback(StyleProperty::Border),
            primary: fallback(StyleProperty::Primary),
            primary_foreground: fallback(StyleProperty::PrimaryForeground),
            muted_background: fallback(StyleProperty::MutedBackground),
            muted_foreground: fallback(StyleProperty::MutedForeground),
            accent: fallback(StyleProperty::Accent),
            accent_foreground: fallback(StyleProperty::AccentForeground),
            font_family: fallback(StyleProperty::FontFamily),
        }
    }
}

/// Translate with the default semantic token table
#[must_use]
pub fn translate(theme: &AssembledTheme) -> ImageStyle {
    translate_with(theme, &TokenMap::default())
}

/// Translate with a caller-provided token table
#[must_use]
pub fn translate_with(theme: &AssembledTheme, map: &TokenMap) -> ImageStyle {
    let mut style = ImageStyle::default();
    for property in StyleProperty::ALL {
        let slot = map.slot(property);
        let Some(raw) = theme.token(slot.group, &slot.token) else {
            continue;
        };
        match resolve(property, raw) {
            Some(value) => *style.slot_mut(property) = value,
            None => tracing::debug!(
                token = %slot.token,
                "blank token, using default for {}",
                property.style_key()
            ),
        }
    }
    style
}

/// Concrete CSS value for a raw token, `None` if blank
fn resolve(property: StyleProperty, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if property.is_color() && is_hsl_components(raw) {
        return Some(format!("hsl({raw})"));
    }
    Some(raw.to_string())
}

/// Whether `raw` is a bare HSL triple such as `222.2 47.4% 11.2%`,
/// optionally followed by `/ alpha`
#[must_use]
pub fn is_hsl_components(raw: &str) -> bool {
    let parts: Vec<_> = raw.split_whitespace().collect();
    let (hsl, alpha) = match parts.as_slice() {
        [h, s, l] => ([*h, *s, *l], None),
        [h, s, l, "/", a] => ([*h, *s, *l], Some(*a)),
        _ => return false,
    };

    let hue = hsl[0].strip_suffix("deg").unwrap_or(hsl[0]);
    let percent = |p: &str| p.strip_suffix('%').is_some_and(is_number);
    let alpha_ok = alpha.map_or(true, |a| is_number(a.strip_suffix('%').unwrap_or(a)));

    is_number(hue) && percent(hsl[1]) && percent(hsl[2]) && alpha_ok
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok_and(f64::is_finite)
}
