//! Theme assembly: load → validate → merge → override → validate
//!
//! Each selected preset is read independently, so all reads are issued
//! together and awaited as a group. Every fragment is validated on its own
//! before anything is merged; a malformed fragment fails the whole assembly
//! instead of being partially applied.

use crate::config::AssemblerConfig;
use crate::error::{AssembleError, AssembleResult};
use crate::font::FontLoader;
use crate::selection::ThemeSelection;
use crate::store::FragmentStore;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use swatch_core::{merge_fragments, FragmentKind, ThemeFragment};
use swatch_schema::{validate, AssembledTheme};
use swatch_style::{css, translate, ImageStyle};
use tokio::sync::OnceCell;

/// A preset that was selected but not found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFragment {
    /// Fragment kind
    pub kind: FragmentKind,
    /// Preset name
    pub name: String,
}

/// Result of a successful assembly
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// The validated theme
    pub theme: AssembledTheme,
    /// Labels of the fragments merged, lowest precedence first
    pub applied: Vec<String>,
    /// Selected presets that were skipped because they do not exist
    pub missing: Vec<MissingFragment>,
}

/// Everything the static image renderer needs
#[derive(Debug, Clone)]
pub struct RenderInputs {
    /// Inline style values
    pub style: ImageStyle,
    /// Font bytes, `None` when no font is configured or it failed to load
    pub font: Option<Arc<[u8]>>,
}

/// Assembles themes from a content directory
#[derive(Debug)]
pub struct ThemeAssembler {
    store: FragmentStore,
    default_selection: ThemeSelection,
    default_theme: OnceCell<Arc<AssembledTheme>>,
    font: Option<FontLoader>,
}

impl ThemeAssembler {
    /// Create assembler from configuration
    #[must_use]
    pub fn new(config: &AssemblerConfig) -> Self {
        Self::with_store(config, FragmentStore::new(config))
    }

    /// Create assembler over an existing store
    #[must_use]
    pub fn with_store(config: &AssemblerConfig, store: FragmentStore) -> Self {
        Self {
            store,
            default_selection: config.default_selection.clone(),
            default_theme: OnceCell::new(),
            font: config.font_path.as_ref().map(FontLoader::new),
        }
    }

    /// Fragment store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// Font loader, if a font is configured
    #[inline]
    #[must_use]
    pub fn font(&self) -> Option<&FontLoader> {
        self.font.as_ref()
    }

    /// Assemble the theme for `selection`
    ///
    /// Presets that do not exist are skipped with a warning, leaving their
    /// tokens to the renderer defaults.
    ///
    /// # Errors
    /// - [`AssembleError::Load`] if a preset exists but cannot be read or parsed
    /// - [`AssembleError::MalformedFragment`] if a preset violates the schema
    /// - [`AssembleError::Layout`] if the section order names unknown sections
    /// - [`AssembleError::InvalidTheme`] if the merged result violates the schema
    pub async fn assemble(&self, selection: &ThemeSelection) -> AssembleResult<Assembly> {
        let presets = selection.presets();
        tracing::info!(
            root = %self.store.root().display(),
            presets = presets.len(),
            overrides = selection.overrides.len(),
            "assembling theme"
        );

        let loads = presets.iter().map(|&(kind, name)| self.store.load(kind, name));
        let results = join_all(loads).await;

        let mut fragments: Vec<Arc<ThemeFragment>> = Vec::with_capacity(presets.len() + 1);
        let mut missing = Vec::new();
        for (&(kind, name), result) in presets.iter().zip(results) {
            match result {
                Ok(fragment) => {
                    check_fragment(&fragment)?;
                    fragments.push(fragment);
                }
                Err(err) if err.is_missing_source() => {
                    let path = self
                        .store
                        .kind_dir(kind)
                        .map_or_else(PathBuf::new, |dir| dir.join(name));
                    tracing::warn!(
                        %kind,
                        path = %path.display(),
                        "fragment not found, falling back to defaults"
                    );
                    missing.push(MissingFragment {
                        kind,
                        name: name.to_string(),
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }

        let overrides = selection.overrides_fragment();
        if !overrides.is_empty() {
            fragments.push(Arc::new(overrides));
        }
        fragments.sort_by_key(|fragment| fragment.kind().precedence());

        let merged = merge_fragments(fragments.iter().map(|fragment| &**fragment));
        let mut theme = validate(&merged).map_err(AssembleError::InvalidTheme)?;

        if let Some(order) = &selection.section_order {
            match theme.layout.as_mut() {
                Some(layout) if layout.sections.is_some() => layout.reorder(order.as_slice())?,
                _ => tracing::warn!(?order, "no layout sections to reorder, keeping defaults"),
            }
        }

        let applied: Vec<String> = fragments.iter().map(|f| f.label().to_string()).collect();
        tracing::debug!(?applied, missing = missing.len(), "theme assembled");

        Ok(Assembly {
            theme,
            applied,
            missing,
        })
    }

    /// Image style for `selection`, never failing
    ///
    /// Any assembly error is logged and answered with the default style.
    pub async fn preview_style(&self, selection: &ThemeSelection) -> ImageStyle {
        match self.assemble(selection).await {
            Ok(assembly) => translate(&assembly.theme),
            Err(err) => {
                tracing::error!(error = %err, "theme assembly failed, using default style");
                ImageStyle::default()
            }
        }
    }

    /// Style and font for the image renderer, never failing
    pub async fn render_inputs(&self, selection: &ThemeSelection) -> RenderInputs {
        let (style, font) = tokio::join!(self.preview_style(selection), self.font_bytes());
        RenderInputs { style, font }
    }

    async fn font_bytes(&self) -> Option<Arc<[u8]>> {
        let loader = self.font.as_ref()?;
        match loader.load().await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(error = %err, "font unavailable, rendering without it");
                None
            }
        }
    }

    /// CSS custom properties for `selection`
    ///
    /// # Errors
    /// Returns the same errors as [`assemble`](Self::assemble)
    pub async fn css(&self, selection: &ThemeSelection, selector: &str) -> AssembleResult<String> {
        let assembly = self.assemble(selection).await?;
        Ok(css::custom_properties(&assembly.theme, selector))
    }

    /// The default selection's theme, assembled on first use
    ///
    /// # Errors
    /// Returns the assembly error; a failed attempt is retried on the next call
    pub async fn default_theme(&self) -> AssembleResult<Arc<AssembledTheme>> {
        self.default_theme
            .get_or_try_init(|| async {
                let assembly = self.assemble(&self.default_selection).await?;
                tracing::info!(applied = ?assembly.applied, "default theme ready");
                Ok::<_, AssembleError>(Arc::new(assembly.theme))
            })
            .await
            .cloned()
    }
}

/// Validate one fragment on its own
fn check_fragment(fragment: &ThemeFragment) -> AssembleResult<()> {
    validate(fragment.tokens())
        .map(|_| ())
        .map_err(|source| AssembleError::MalformedFragment {
            kind: fragment.kind(),
            label: fragment.label().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_test_utils::ContentDir;

    fn assembler(content: &ContentDir) -> ThemeAssembler {
        ThemeAssembler::new(&AssemblerConfig::new().with_content_dir(content.path()))
    }

    #[tokio::test]
    async fn presets_apply_in_precedence_order() {
        let content = ContentDir::new()
            .with_json("themes/default.json", r#"{"colors": {"primary": "1 1% 1%", "accent": "5 5% 5%"}}"#)
            .with_json("colors/ocean.json", r#"{"colors": {"primary": "2 2% 2%"}}"#);

        let selection = ThemeSelection::new().with_base("default").with_preset(FragmentKind::Colors, "ocean");
        let assembly = assembler(&content).assemble(&selection).await.unwrap();

        assert_eq!(assembly.theme.color("primary"), Some("2 2% 2%"));
        assert_eq!(assembly.theme.color("accent"), Some("5 5% 5%"));
        assert_eq!(assembly.applied, vec!["base/default", "colors/ocean"]);
        assert!(assembly.missing.is_empty());
    }

    #[tokio::test]
    async fn overrides_win() {
        let content = ContentDir::new()
            .with_json("colors/ocean.json", r#"{"colors": {"primary": "2 2% 2%"}}"#);
        let selection = ThemeSelection::new()
            .with_preset(FragmentKind::Colors, "ocean")
            .with_override("colors.primary=9 9% 9%".parse().unwrap());

        let assembly = assembler(&content).assemble(&selection).await.unwrap();
        assert_eq!(assembly.theme.color("primary"), Some("9 9% 9%"));
        assert_eq!(assembly.applied.last().map(String::as_str), Some("overrides"));
    }

    #[tokio::test]
    async fn missing_preset_is_skipped() {
        let content = ContentDir::new().with_json("themes/default.json", r#"{"fonts": {"sans": "Inter"}}"#);
        let selection = ThemeSelection::new()
            .with_base("default")
            .with_preset(FragmentKind::Fonts, "nonexistent");

        let assembly = assembler(&content).assemble(&selection).await.unwrap();
        assert_eq!(assembly.theme.font("sans"), Some("Inter"));
        assert_eq!(
            assembly.missing,
            vec![MissingFragment {
                kind: FragmentKind::Fonts,
                name: "nonexistent".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn malformed_preset_fails_with_all_violations() {
        let content = ContentDir::new()
            .with_json("themes/default.json", r#"{"colors": {"primary": "1 1% 1%"}}"#)
            .with_json("colors/broken.json", r#"{"colors": {"primary": 123, "accent": true}}"#);
        let selection = ThemeSelection::new().with_base("default").with_preset(FragmentKind::Colors, "broken");

        let err = assembler(&content).assemble(&selection).await.unwrap_err();
        match &err {
            AssembleError::MalformedFragment { kind, label, source } => {
                assert_eq!(*kind, FragmentKind::Colors);
                assert_eq!(label, "colors/broken");
                assert_eq!(source.paths(), vec!["colors.primary", "colors.accent"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn syntax_error_is_an_error() {
        let content = ContentDir::new().with_json("themes/default.json", r#"{"colors": "#);
        let err = assembler(&content)
            .assemble(&ThemeSelection::new().with_base("default"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssembleError::Load(_)));
    }

    #[tokio::test]
    async fn section_order_applied() {
        let content = ContentDir::new().with_json(
            "themes/default.json",
            r#"{"layout": {"sections": [{"name": "hero"}, {"name": "pricing"}, {"name": "footer"}]}}"#,
        );
        let selection = ThemeSelection::new()
            .with_base("default")
            .with_section_order(["footer", "hero"]);

        let assembly = assembler(&content).assemble(&selection).await.unwrap();
        let names = assembly.theme.layout.as_ref().unwrap().section_names();
        assert_eq!(names, vec!["footer", "hero", "pricing"]);
    }

    #[tokio::test]
    async fn unknown_section_in_order() {
        let content = ContentDir::new().with_json(
            "themes/default.json",
            r#"{"layout": {"sections": [{"name": "hero"}]}}"#,
        );
        let selection = ThemeSelection::new()
            .with_base("default")
            .with_section_order(["faq"]);

        let err = assembler(&content).assemble(&selection).await.unwrap_err();
        assert!(matches!(err, AssembleError::Layout(_)));
    }

    #[tokio::test]
    async fn section_order_without_sections_is_skipped() {
        let content = ContentDir::new().with_json("colors/ocean.json", r#"{"colors": {"primary": "2 2% 2%"}}"#);
        let selection = ThemeSelection::new()
            .with_base("default")
            .with_preset(FragmentKind::Colors, "ocean")
            .with_section_order(["hero"]);
        let assembler = assembler(&content);

        let assembly = assembler.assemble(&selection).await.unwrap();
        assert_eq!(assembly.theme.color("primary"), Some("2 2% 2%"));
        assert!(assembly.theme.sections().is_none());
        assert_eq!(assembly.missing.len(), 1);

        let style = assembler.preview_style(&selection).await;
        assert_eq!(style.primary, "hsl(2 2% 2%)");

        let empty_order = ThemeSelection::new().with_section_order(Vec::<String>::new());
        assert!(assembler.assemble(&empty_order).await.is_ok());
    }

    #[tokio::test]
    async fn preview_style_falls_back_on_error() {
        let content = ContentDir::new().with_json("themes/default.json", r#"{"colors": []}"#);
        let style = assembler(&content)
            .preview_style(&ThemeSelection::new().with_base("default"))
            .await;
        assert_eq!(style, ImageStyle::default());
    }

    #[tokio::test]
    async fn preview_style_translates() {
        let content = ContentDir::new().with_json("themes/default.json", r#"{"colors": {"primary": "10 90% 50%"}}"#);
        let style = assembler(&content)
            .preview_style(&ThemeSelection::new().with_base("default"))
            .await;
        assert_eq!(style.primary, "hsl(10 90% 50%)");
        assert_eq!(style.background, ImageStyle::default().background);
    }

    #[tokio::test]
    async fn default_theme_is_memoized() {
        let content = ContentDir::new().with_json("themes/default.json", r#"{"colors": {"primary": "1 1% 1%"}}"#);
        let assembler = assembler(&content);

        let first = assembler.default_theme().await.unwrap();
        content.remove("themes/default.json");
        let second = assembler.default_theme().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.color("primary"), Some("1 1% 1%"));
    }

    #[tokio::test]
    async fn css_output() {
        let content = ContentDir::new().with_json("themes/default.json", r#"{"geometry": {"radius": "0.5rem"}}"#);
        let css = assembler(&content)
            .css(&ThemeSelection::new().with_base("default"), ":root")
            .await
            .unwrap();
        assert_eq!(css, ":root {\n  --radius: 0.5rem;\n}\n");
    }

    #[tokio::test]
    async fn render_inputs_without_font() {
        let content = ContentDir::new();
        let inputs = assembler(&content).render_inputs(&ThemeSelection::new()).await;
        assert_eq!(inputs.style, ImageStyle::default());
        assert!(inputs.font.is_none());
    }

    #[tokio::test]
    async fn render_inputs_with_font() {
        let content = ContentDir::new().with_bytes("Inter.ttf", b"font");
        let config = AssemblerConfig::new()
            .with_content_dir(content.path())
            .with_font_path(content.path().join("Inter.ttf"));
        let inputs = ThemeAssembler::new(&config).render_inputs(&ThemeSelection::new()).await;
        assert_eq!(inputs.font.as_deref(), Some(&b"font"[..]));
    }
}
