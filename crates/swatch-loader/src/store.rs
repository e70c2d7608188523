//! Fragment store: the only component that touches the content directory
//!
//! A preset `name` of kind `k` lives at `<content_dir>/<k dir>/<name>.<ext>`
//! for the first registered extension that exists.

use crate::cache::{FragmentCache, FragmentKey};
use crate::config::AssemblerConfig;
use crate::error::LoadError;
use crate::parsers::{default_parsers, ParserRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use swatch_core::{is_segment_char, ContentHash, FragmentKind, ThemeFragment};

/// Reads, parses and caches fragment files
#[derive(Debug, Clone)]
pub struct FragmentStore {
    /// Content root
    root: PathBuf,
    /// Registered parsers by file extension
    parsers: ParserRegistry,
    /// Content-addressed cache
    cache: FragmentCache,
    /// Maximum file size to parse (bytes)
    max_file_size: u64,
}

impl FragmentStore {
    /// Create store with default parsers
    #[must_use]
    pub fn new(config: &AssemblerConfig) -> Self {
        Self::with_parsers(config, default_parsers())
    }

    /// Create store with a custom parser registry
    #[must_use]
    pub fn with_parsers(config: &AssemblerConfig, parsers: ParserRegistry) -> Self {
        let cache = match config.cache_ttl() {
            Some(ttl) => FragmentCache::with_ttl(config.cache_capacity, ttl),
            None => FragmentCache::new(config.cache_capacity),
        };
        Self {
            root: config.content_dir.clone(),
            parsers,
            cache,
            max_file_size: config.max_file_size,
        }
    }

    /// Content root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get cache reference
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &FragmentCache {
        &self.cache
    }

    /// Directory holding presets of `kind`
    #[must_use]
    pub fn kind_dir(&self, kind: FragmentKind) -> Option<PathBuf> {
        kind.dir_name().map(|dir| self.root.join(dir))
    }

    /// Locate the file for a preset
    ///
    /// # Errors
    /// - [`LoadError::InvalidName`] if `name` is not a plain file stem
    /// - [`LoadError::NotFound`] if no file exists under any extension
    pub async fn resolve(&self, kind: FragmentKind, name: &str) -> Result<PathBuf, LoadError> {
        if name.is_empty() || !name.chars().all(is_segment_char) {
            return Err(LoadError::InvalidName(name.to_string()));
        }
        let Some(dir) = self.kind_dir(kind) else {
            return Err(LoadError::InvalidName(format!("{kind}/{name}")));
        };

        for ext in self.parsers.all_extensions() {
            let candidate = dir.join(format!("{name}.{ext}"));
            match tokio::fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => return Ok(candidate),
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(LoadError::io_error(candidate, e)),
            }
        }

        Err(LoadError::NotFound {
            kind,
            name: name.to_string(),
            dir,
        })
    }

    /// Load a preset by name
    ///
    /// # Errors
    /// Returns error if the preset cannot be found, read or parsed
    pub async fn load(
        &self,
        kind: FragmentKind,
        name: &str,
    ) -> Result<Arc<ThemeFragment>, LoadError> {
        let path = self.resolve(kind, name).await?;
        self.load_path(kind, format!("{kind}/{name}"), &path).await
    }

    /// Load a fragment file directly
    ///
    /// # Errors
    /// - [`LoadError::NoParserForExtension`] if no parser handles the file
    /// - [`LoadError::TooLarge`] if the file exceeds the size limit
    /// - [`LoadError::Io`] if the read fails
    /// - [`LoadError::Fragment`] if the content is not a fragment
    pub async fn load_path(
        &self,
        kind: FragmentKind,
        label: impl Into<String>,
        path: &Path,
    ) -> Result<Arc<ThemeFragment>, LoadError> {
        let label = label.into();
        let parser = self.parsers.find_for_path(path).ok_or_else(|| {
            let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            LoadError::NoParserForExtension(extension.to_string())
        })?;

        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| LoadError::io_error(path, e))?
            .len();
        if size > self.max_file_size {
            return Err(LoadError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: self.max_file_size,
            });
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::io_error(path, e))?;
        let hash = ContentHash::of_source(parser.format(), &content);
        tracing::debug!(%label, path = %path.display(), hash = %hash.short(), "loading fragment");

        let key = FragmentKey::new(kind, label.as_str(), hash);
        let (label, content) = (label.as_str(), content.as_str());
        self.cache
            .try_get_or_insert_with(key, || async move { parser.parse(kind, label, content) })
            .await
    }
}
