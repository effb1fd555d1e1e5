//! Palette validation for `theme.colors` / `theme.extend.colors`.

use regex_lite::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Shade key used when a palette is referenced without a shade (`primary`).
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// Palette validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("colors must be a mapping, got {0}")]
    NotAMapping(String),

    #[error("color '{path}' must be a string or a shade mapping, got {kind}")]
    InvalidEntry { path: String, kind: String },

    #[error("color '{path}' has an empty shade key")]
    EmptyShade { path: String },

    #[error("color '{path}' is not a valid hex color: {value}")]
    InvalidHex { path: String, value: String },
}

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
    })
}

/// Short name of a value's kind, for error messages
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// Validate a colors node.
///
/// Palettes may nest (`brand.blue.500`) and shade keys may be any name
/// (`light`, `500`, `DEFAULT`). Only the leaves are checked. A null node (no
/// colors configured) is valid.
pub fn validate_colors(colors: &Value) -> Result<(), PaletteError> {
    match colors {
        Value::Null => Ok(()),
        Value::Object(map) => {
            for (name, entry) in map {
                validate_entry(name, entry)?;
            }
            Ok(())
        }
        other => Err(PaletteError::NotAMapping(kind_of(other).to_string())),
    }
}

fn validate_entry(path: &str, entry: &Value) -> Result<(), PaletteError> {
    match entry {
        Value::String(color) => validate_color_string(path, color),
        Value::Object(shades) => {
            for (shade, value) in shades {
                if shade.is_empty() {
                    return Err(PaletteError::EmptyShade {
                        path: path.to_string(),
                    });
                }
                validate_entry(&format!("{}-{}", path, shade), value)?;
            }
            Ok(())
        }
        other => Err(PaletteError::InvalidEntry {
            path: path.to_string(),
            kind: kind_of(other).to_string(),
        }),
    }
}

// Only `#`-prefixed strings are checked; rgb(), hsl() and named colors pass through
fn validate_color_string(path: &str, color: &str) -> Result<(), PaletteError> {
    if color.starts_with('#') && !hex_color_re().is_match(color) {
        return Err(PaletteError::InvalidHex {
            path: path.to_string(),
            value: color.to_string(),
        });
    }
    Ok(())
}
