//! Theme layering
//!
//! Implements the 3-layer theme merge:
//! 1. Built-in library palettes
//! 2. Theme files (vpack.theme.json / vpack.theme.toml), in order
//! 3. Inline overrides

mod defaults;
mod effective;

pub use defaults::{DefaultTheme, Palette, SHADE_LEVELS};
pub use effective::{
    load_theme_file, toml_to_json, ConfigError, ConfigOrigin, ConfigSource, EffectiveTheme,
};
