//! Font bytes for the image renderer, read once per loader

use crate::error::LoadError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily reads and memoizes one font file
///
/// Concurrent first calls share a single read. A failed read is not
/// memoized and is retried on the next call.
#[derive(Debug)]
pub struct FontLoader {
    path: PathBuf,
    bytes: OnceCell<Arc<[u8]>>,
}

impl FontLoader {
    /// Create loader for `path`; nothing is read yet
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bytes: OnceCell::new(),
        }
    }

    /// Font file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the font has been read
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.bytes.initialized()
    }

    /// Font bytes, reading the file on first use
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the file cannot be read
    pub async fn load(&self) -> Result<Arc<[u8]>, LoadError> {
        self.bytes
            .get_or_try_init(|| async {
                let data = tokio::fs::read(&self.path)
                    .await
                    .map_err(|e| LoadError::io_error(&self.path, e))?;
                tracing::info!(path = %self.path.display(), bytes = data.len(), "font loaded");
                Ok::<_, LoadError>(Arc::from(data))
            })
            .await
            .cloned()
    }
}
