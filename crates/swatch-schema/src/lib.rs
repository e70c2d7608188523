//! Swatch Schema
//!
//! Turns a merged theme object into a typed [`AssembledTheme`], or into a
//! [`SchemaError`] that lists every violated field path at once.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use swatch_schema::validate;
//!
//! let err = validate(&json!({"colors": {"primary": 123}})).unwrap_err();
//! assert_eq!(err.paths(), vec!["colors.primary"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod theme;
mod validate;

pub use theme::{AssembledTheme, GroupKind, Layout, LayoutError, Section, TokenGroup};
pub use validate::{validate, SchemaError, Violation, ViolationKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
