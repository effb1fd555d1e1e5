//! Theme resolution
//!
//! The provider merges a caller theme onto the default theme and exposes the
//! result, with color-token lookup, to the styling layer.

mod palette;
mod provider;
mod resolved;

pub use palette::{validate_colors, PaletteError, DEFAULT_SHADE};
pub use provider::{ThemeProvider, DEFAULT_CACHE_CAPACITY};
pub use resolved::{fingerprint, ResolvedTheme};

/// Theme resolution errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Fingerprint error: {0}")]
    Fingerprint(String),
}
