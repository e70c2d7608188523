//! Testing utilities for Swatch workspace
//!
//! Shared fixtures: sample fragments and throwaway content directories.

#![allow(missing_docs)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn base_theme() -> Value {
    json!({
        "colors": {
            "background": "0 0% 100%",
            "foreground": "222.2 84% 4.9%",
            "primary": "222.2 47.4% 11.2%",
            "primary-foreground": "210 40% 98%"
        },
        "fonts": {"sans": "Inter, system-ui, sans-serif"},
        "geometry": {"radius": "0.5rem"},
        "layout": {
            "sections": [{"name": "hero"}, {"name": "features"}, {"name": "footer"}]
        }
    })
}

pub fn ocean_colors() -> Value {
    json!({
        "colors": {
            "primary": "199 89% 48%",
            "accent": "187 72% 93%",
            "accent-foreground": "199 89% 20%"
        }
    })
}

pub const SERIF_FONTS_YAML: &str = "\
fonts:
  sans: \"Georgia, serif\"
  mono: \"JetBrains Mono, monospace\"
";

pub fn round_radius() -> Value {
    json!({"geometry": {"radius": "1rem"}})
}

/// Temporary content directory, removed on drop
#[derive(Debug)]
pub struct ContentDir {
    dir: TempDir,
}

impl ContentDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// The default theme, ocean colors, serif fonts and round radius
    pub fn sample() -> Self {
        Self::new()
            .with_json("themes/default.json", &base_theme().to_string())
            .with_json("colors/ocean.json", &ocean_colors().to_string())
            .with_file("fonts/serif.yaml", SERIF_FONTS_YAML)
            .with_json("radius/round.json", &round_radius().to_string())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn with_json(self, rel: &str, json: &str) -> Self {
        self.write(rel, json.as_bytes());
        self
    }

    pub fn with_file(self, rel: &str, text: &str) -> Self {
        self.write(rel, text.as_bytes());
        self
    }

    pub fn with_bytes(self, rel: &str, bytes: &[u8]) -> Self {
        self.write(rel, bytes);
        self
    }

    pub fn write(&self, rel: &str, bytes: &[u8]) {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, bytes).unwrap();
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.join(rel)).unwrap();
    }

    /// Write `swatch.toml` at the root and return its path
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write("swatch.toml", toml.as_bytes());
        self.join("swatch.toml")
    }
}

impl Default for ContentDir {
    fn default() -> Self {
        Self::new()
    }
}
