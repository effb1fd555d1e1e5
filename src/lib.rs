//! V-Pack theme core
//!
//! This crate implements the theming layer of the V-Pack component library:
//! the built-in palettes, deep-merging of caller themes onto them, and the
//! provider that resolves color tokens for the styling engine.

pub mod config;
pub mod init;
pub mod theme;

pub use config::{ConfigError, DefaultTheme, EffectiveTheme};
pub use theme::{ResolvedTheme, ThemeError, ThemeProvider};
pub use vpack_merge::{merge, merge_all};
