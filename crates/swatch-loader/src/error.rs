//! Error types for fragment loading and theme assembly
//!
//! - [`LoadError`]: reading and parsing one fragment source
//! - [`AssembleError`]: the assembly pipeline as a whole
//! - [`ConfigError`]: reading [`AssemblerConfig`](crate::AssemblerConfig)
//! - [`Error`]: any of the above, for callers that do not care which

use crate::selection::OverrideError;
use std::path::PathBuf;
use swatch_core::{FragmentError, FragmentKind};
use swatch_schema::{LayoutError, SchemaError};

/// Errors reading one fragment source
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No file for the preset under any registered extension
    #[error("no {kind} fragment named '{name}' in {dir}")]
    NotFound {
        /// Fragment kind
        kind: FragmentKind,
        /// Preset name
        name: String,
        /// Directory searched
        dir: PathBuf,
    },

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// No parser registered for file extension
    #[error("no parser registered for extension: '{0}'")]
    NoParserForExtension(String),

    /// File exceeds the configured size limit
    #[error("{path} is too large: {size} bytes (max: {max})")]
    TooLarge {
        /// File path
        path: PathBuf,
        /// Actual size
        size: u64,
        /// Configured limit
        max: u64,
    },

    /// Preset name would escape its directory or is empty
    #[error("invalid preset name: '{0}'")]
    InvalidName(String),

    /// Source text is not a fragment
    #[error(transparent)]
    Fragment(#[from] FragmentError),
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the source simply is not there
    ///
    /// Missing sources fall back to defaults; everything else is an error.
    #[must_use]
    pub fn is_missing_source(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Errors from the assembly pipeline
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// A fragment could not be read or parsed
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A fragment parsed but has the wrong shape
    #[error("malformed fragment {label}: {source}")]
    MalformedFragment {
        /// Fragment kind
        kind: FragmentKind,
        /// Fragment label
        label: String,
        /// Every violation in the fragment
        #[source]
        source: SchemaError,
    },

    /// The merged theme has the wrong shape
    #[error("assembled theme is invalid: {0}")]
    InvalidTheme(#[source] SchemaError),

    /// Requested section order does not fit the layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl AssembleError {
    /// Schema violations carried by this error, if any
    #[must_use]
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::MalformedFragment { source, .. } | Self::InvalidTheme(source) => Some(source),
            _ => None,
        }
    }
}

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the config schema
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Any error from this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Assembly failed
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token override could not be parsed
    #[error(transparent)]
    Override(#[from] OverrideError),
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Self::Assemble(err.into())
    }
}

/// Result type alias for assembly operations
pub type AssembleResult<T> = Result<T, AssembleError>;
