//! Theme fragments
//!
//! A fragment is one partial source of design tokens: the base theme, a
//! color/font/radius preset, or the user's granular overrides.

use crate::path::TokenPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Where a fragment comes from, which also fixes its merge precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Base theme
    Base,
    /// Color palette preset
    Colors,
    /// Font set preset
    Fonts,
    /// Radius / geometry preset
    Radius,
    /// Granular per-token overrides
    Overrides,
}

impl FragmentKind {
    /// Every kind, lowest precedence first
    pub const ALL: [Self; 5] = [
        Self::Base,
        Self::Colors,
        Self::Fonts,
        Self::Radius,
        Self::Overrides,
    ];

    /// Merge precedence (higher wins)
    #[inline]
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Base => 0,
            Self::Colors => 1,
            Self::Fonts => 2,
            Self::Radius => 3,
            Self::Overrides => 4,
        }
    }

    /// Content subdirectory holding presets of this kind
    ///
    /// Overrides are never read from disk.
    #[inline]
    #[must_use]
    pub const fn dir_name(self) -> Option<&'static str> {
        match self {
            Self::Base => Some("themes"),
            Self::Colors => Some("colors"),
            Self::Fonts => Some("fonts"),
            Self::Radius => Some("radius"),
            Self::Overrides => None,
        }
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Colors => "colors",
            Self::Fonts => "fonts",
            Self::Radius => "radius",
            Self::Overrides => "overrides",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial record of design tokens from one source
///
/// The root is always a JSON object; its shape is checked later by the
/// schema validator, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeFragment {
    kind: FragmentKind,
    label: String,
    tokens: Value,
}

impl ThemeFragment {
    /// Create from a parsed JSON value
    ///
    /// # Errors
    /// Returns [`FragmentError::NotAnObject`] if the root is not an object
    pub fn new(
        kind: FragmentKind,
        label: impl Into<String>,
        tokens: Value,
    ) -> Result<Self, FragmentError> {
        let label = label.into();
        if !tokens.is_object() {
            return Err(FragmentError::NotAnObject {
                label,
                found: json_type_name(&tokens),
            });
        }
        Ok(Self {
            kind,
            label,
            tokens,
        })
    }

    /// Empty fragment
    #[inline]
    #[must_use]
    pub fn empty(kind: FragmentKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            tokens: Value::Object(Map::new()),
        }
    }

    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or its root is not an object
    pub fn from_json(
        kind: FragmentKind,
        label: impl Into<String>,
        json: &str,
    ) -> Result<Self, FragmentError> {
        let label = label.into();
        let value: Value = serde_json::from_str(json).map_err(|e| FragmentError::Syntax {
            label: label.clone(),
            message: e.to_string(),
        })?;
        Self::new(kind, label, value)
    }

    /// Fragment kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Human-readable origin, e.g. `colors/ocean`
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Raw token tree
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &Value {
        &self.tokens
    }

    /// Consume into the raw token tree
    #[inline]
    #[must_use]
    pub fn into_tokens(self) -> Value {
        self.tokens
    }

    /// Whether the fragment holds no keys at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.as_object().map_or(true, Map::is_empty)
    }

    /// Value at `path`
    #[must_use]
    pub fn get(&self, path: &TokenPath) -> Option<&Value> {
        path.iter().try_fold(&self.tokens, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Set the value at `path`, creating intermediate objects
    ///
    /// An intermediate that is not an object is replaced by one. Setting the
    /// root path is ignored, since the root must stay an object.
    pub fn set(&mut self, path: &TokenPath, value: Value) {
        let Some((leaf, parents)) = path.segments().split_last() else {
            return;
        };

        let mut current = &mut self.tokens;
        for segment in parents {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return;
            };
            current = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        if let Value::Object(map) = current {
            map.insert(leaf.clone(), value);
        }
    }
}

/// JSON type name for diagnostics
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fragment construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    /// Source text is not valid JSON
    #[error("syntax error in fragment {label}: {message}")]
    Syntax {
        /// Fragment label
        label: String,
        /// Parser message
        message: String,
    },

    /// Root value is not an object
    #[error("fragment {label} must be an object, found {found}")]
    NotAnObject {
        /// Fragment label
        label: String,
        /// JSON type of the root
        found: &'static str,
    },
}
