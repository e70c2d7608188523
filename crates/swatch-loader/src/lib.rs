//! Swatch Loader
//!
//! Reads theme fragments from a content directory and assembles them:
//!
//! ```text
//! content/
//!   themes/<name>.json    base themes
//!   colors/<name>.json    color palettes
//!   fonts/<name>.yaml     font sets
//!   radius/<name>.yml     geometry presets
//! ```
//!
//! Fragments are merged `base < colors < fonts < radius < overrides`.
//! Every file goes through [`FragmentStore`], which parses it with the
//! registered [`FragmentParser`] for its extension and caches the result by
//! content hash.
//!
//! # Example
//!
//! ```rust,no_run
//! use swatch_core::FragmentKind;
//! use swatch_loader::{AssemblerConfig, ThemeAssembler, ThemeSelection};
//!
//! # async fn example() -> Result<(), swatch_loader::Error> {
//! let config = AssemblerConfig::new().with_content_dir("content");
//! let assembler = ThemeAssembler::new(&config);
//!
//! let selection = ThemeSelection::new()
//!     .with_base("default")
//!     .with_preset(FragmentKind::Colors, "ocean")
//!     .with_override("colors.primary=222.2 47.4% 11.2%".parse()?);
//!
//! let assembly = assembler.assemble(&selection).await?;
//! println!("{}", assembly.theme.to_value());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod assembler;
pub mod cache;
pub mod config;
pub mod error;
pub mod font;
pub mod parsers;
pub mod selection;
pub mod store;

pub use assembler::{Assembly, MissingFragment, RenderInputs, ThemeAssembler};
pub use cache::{CacheStats, FragmentCache, FragmentKey};
pub use config::AssemblerConfig;
pub use error::{AssembleError, AssembleResult, ConfigError, Error, LoadError};
pub use font::FontLoader;
pub use parsers::{default_parsers, FragmentParser, JsonParser, ParserRegistry, YamlParser};
pub use selection::{OverrideError, ThemeSelection, TokenOverride};
pub use store::FragmentStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
