//! Swatch Style
//!
//! Serializes an [`AssembledTheme`](swatch_schema::AssembledTheme) for its
//! two rendering targets:
//!
//! - [`translate`]: a flat, always fully populated [`ImageStyle`] for the
//!   static image renderer
//! - [`css::custom_properties`]: a block of CSS custom properties
//!
//! # Example
//!
//! ```rust
//! use swatch_schema::AssembledTheme;
//! use swatch_style::{translate, ImageStyle};
//!
//! // Nothing in, every default out
//! assert_eq!(translate(&AssembledTheme::default()), ImageStyle::default());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod css;
mod slots;
mod translate;

pub use slots::{StyleProperty, TokenMap, TokenSlot};
pub use translate::{is_hsl_components, translate, translate_with, ImageStyle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
