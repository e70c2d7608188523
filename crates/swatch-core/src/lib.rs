//! Swatch Core
//!
//! Partial theme objects and the deep merge that assembles them.
//!
//! # Core Concepts
//!
//! - [`ThemeFragment`]: one partial source of design tokens
//! - [`FragmentKind`]: base, color/font/radius preset, or overrides
//! - [`TokenPath`]: dot-separated address of a token (`colors.primary`)
//! - [`merge`] / [`merge_all`]: later-wins deep merge, arrays replaced
//! - [`ContentHash`]: Blake3 digest used as a cache key
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use swatch_core::merge;
//!
//! let a = json!({"colors": {"primary": "10 90% 50%"}});
//! let b = json!({"colors": {"secondary": "200 50% 40%"}});
//!
//! assert_eq!(
//!     merge(&a, &b),
//!     json!({"colors": {"primary": "10 90% 50%", "secondary": "200 50% 40%"}})
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod fragment;
mod hash;
mod merge;
mod path;

pub use fragment::{json_type_name, FragmentError, FragmentKind, ThemeFragment};
pub use hash::{ContentHash, HashError};
pub use merge::{merge, merge_all, merge_fragments, merge_into};
pub use path::{is_segment_char, PathError, TokenPath};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fragments_merge_in_given_order() {
        let base = ThemeFragment::new(
            FragmentKind::Base,
            "themes/default",
            json!({"colors": {"primary": "1 1% 1%", "accent": "2 2% 2%"}}),
        )
        .unwrap();
        let mut overrides = ThemeFragment::empty(FragmentKind::Overrides, "overrides");
        overrides.set(&"colors.primary".parse().unwrap(), json!("9 9% 9%"));

        let merged = merge_fragments([&base, &overrides]);
        assert_eq!(
            merged,
            json!({"colors": {"primary": "9 9% 9%", "accent": "2 2% 2%"}})
        );
    }
}
