//! Assembler configuration
//!
//! Read from TOML, every field optional:
//!
//! ```toml
//! content_dir = "content"
//! cache_capacity = 500
//! cache_ttl_secs = 300
//! font_path = "assets/Inter-Regular.ttf"
//!
//! [default_selection]
//! base = "default"
//! colors = "slate"
//! ```

use crate::error::ConfigError;
use crate::selection::ThemeSelection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for [`ThemeAssembler`](crate::ThemeAssembler)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblerConfig {
    /// Root holding `themes/`, `colors/`, `fonts/` and `radius/`
    pub content_dir: PathBuf,
    /// Maximum cached fragments
    pub cache_capacity: u64,
    /// Cached fragment lifetime in seconds
    pub cache_ttl_secs: Option<u64>,
    /// Largest fragment file accepted, in bytes
    pub max_file_size: u64,
    /// Font file for the image renderer
    pub font_path: Option<PathBuf>,
    /// Selection used for the default theme
    pub default_selection: ThemeSelection,
}

impl AssemblerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] for invalid TOML or unknown keys
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read from a TOML file
    ///
    /// Relative `content_dir` and `font_path` are resolved against the
    /// file's directory.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(dir) = path.parent() {
            config.content_dir = dir.join(&config.content_dir);
            config.font_path = config.font_path.map(|font| dir.join(font));
        }
        Ok(config)
    }

    /// With content directory
    #[inline]
    #[must_use]
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With cache time-to-live
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = Some(ttl.as_secs());
        self
    }

    /// With maximum fragment file size
    #[inline]
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// With font file
    #[inline]
    #[must_use]
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// With default selection
    #[inline]
    #[must_use]
    pub fn with_default_selection(mut self, selection: ThemeSelection) -> Self {
        self.default_selection = selection;
        self
    }

    /// Cache time-to-live, if any
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            cache_capacity: 1_000,
            cache_ttl_secs: None,
            max_file_size: 1024 * 1024, // 1MB
            font_path: None,
            default_selection: ThemeSelection::new().with_base("default"),
        }
    }
}
