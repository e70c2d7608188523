//! CSS custom property serialization
//!
//! Produces the `--token-name: value;` block written into a style element.
//! Color values stay raw HSL triples so stylesheets can compose them as
//! `hsl(var(--primary) / 0.5)`.

use std::collections::HashSet;
use std::fmt::Write as _;
use swatch_core::is_segment_char;
use swatch_schema::{AssembledTheme, GroupKind};

/// Custom property name prefix for a group
const fn prefix(kind: GroupKind) -> &'static str {
    match kind {
        GroupKind::Colors | GroupKind::Geometry => "--",
        GroupKind::Fonts => "--font-",
    }
}

/// `(property name, value)` pairs for every usable token
///
/// Groups come in colors, fonts, geometry order, tokens sorted by name.
/// Tokens whose name or value could escape the declaration block or the
/// enclosing `<style>` element are skipped. Colors and geometry share the
/// bare `--` prefix; on a name clash the first declaration is kept.
#[must_use]
pub fn declarations(theme: &AssembledTheme) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for kind in GroupKind::ALL {
        let Some(group) = theme.group(kind) else {
            continue;
        };
        for (name, value) in group {
            if name.is_empty() || !name.chars().all(is_segment_char) {
                tracing::warn!(group = kind.key(), token = %name, "skipping token with invalid name");
                continue;
            }
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if value.contains([';', '{', '}', '<', '\n', '\r']) {
                tracing::warn!(group = kind.key(), token = %name, "skipping token with unsafe value");
                continue;
            }
            let property = format!("{}{name}", prefix(kind));
            if !seen.insert(property.clone()) {
                tracing::warn!(group = kind.key(), token = %name, "skipping token shadowed by {property}");
                continue;
            }
            out.push((property, value.to_string()));
        }
    }
    out
}

/// Full rule block for `selector`
///
/// ```rust
/// use serde_json::json;
/// use swatch_schema::validate;
/// use swatch_style::css::custom_properties;
///
/// let theme = validate(&json!({"colors": {"primary": "10 90% 50%"}})).unwrap();
/// assert_eq!(custom_properties(&theme, ":root"), ":root {\n  --primary: 10 90% 50%;\n}\n");
/// ```
#[must_use]
pub fn custom_properties(theme: &AssembledTheme, selector: &str) -> String {
    let mut css = format!("{selector} {{\n");
    for (name, value) in declarations(theme) {
        // writing to a String cannot fail
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use swatch_schema::validate;

    #[test]
    fn empty_theme_is_empty_block() {
        assert_eq!(custom_properties(&AssembledTheme::default(), ":root"), ":root {\n}\n");
    }

    #[test]
    fn groups_get_their_prefixes() {
        let theme = validate(&json!({
            "geometry": {"radius": "0.5rem"},
            "fonts": {"sans": "Inter, sans-serif"},
            "colors": {"primary-foreground": "210 40% 98%", "background": "0 0% 100%"}
        }))
        .unwrap();

        assert_eq!(
            custom_properties(&theme, "[data-theme=\"campaign\"]"),
            "[data-theme=\"campaign\"] {\n  \
             --background: 0 0% 100%;\n  \
             --primary-foreground: 210 40% 98%;\n  \
             --font-sans: Inter, sans-serif;\n  \
             --radius: 0.5rem;\n}\n"
        );
    }

    #[test]
    fn unsafe_tokens_are_skipped() {
        let theme = validate(&json!({
            "colors": {
                "primary": "1 1% 1%; } body { display: none",
                "bad name": "2 2% 2%",
                "accent": "3 3% 3%",
                "muted": "  "
            },
            "fonts": {
                "sans": "Inter</style><script>alert(1)</script>"
            }
        }))
        .unwrap();

        assert_eq!(
            declarations(&theme),
            vec![("--accent".to_string(), "3 3% 3%".to_string())]
        );
    }

    #[test]
    fn clashing_names_emit_once() {
        let theme = validate(&json!({
            "colors": {"radius": "1 1% 1%"},
            "geometry": {"radius": "0.5rem", "gap": "1rem"}
        }))
        .unwrap();

        assert_eq!(
            declarations(&theme),
            vec![
                ("--radius".to_string(), "1 1% 1%".to_string()),
                ("--gap".to_string(), "1rem".to_string()),
            ]
        );
    }
}
