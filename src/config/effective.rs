//! Effective theme with full provenance
//!
//! The effective theme captures the merged configuration plus
//! information about where each layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use vpack_merge::merge_all;

use super::defaults::DefaultTheme;
use crate::theme::{fingerprint, validate_colors, PaletteError, ResolvedTheme};

/// Schema version for effective_theme
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "vpack/effective_theme@1";

/// Origin of a theme layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Inline,
}

/// A contributing theme layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// File path (None for builtin/inline)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/inline)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Effective theme with full provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveTheme {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this theme was computed
    pub created_at: DateTime<Utc>,

    /// SHA-256 of the canonical merged config
    pub fingerprint: String,

    /// The merged configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveTheme {
    /// Build effective theme from layers
    pub fn build(theme_files: &[&Path], inline: Option<Value>) -> Result<Self, ConfigError> {
        Self::build_on(Some(DefaultTheme::default().to_value()), theme_files, inline)
    }

    /// Build from layers over an explicit base (None skips the builtin layer)
    pub fn build_on(
        base: Option<Value>,
        theme_files: &[&Path],
        inline: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        if let Some(base) = base {
            layers.push(base);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Builtin,
                path: None,
                digest: None,
            });
        }

        // Layer 2: Theme files, in order
        for path in theme_files {
            let (value, digest) = load_theme_file(path)?;
            tracing::debug!(path = %path.display(), digest = %digest, "loaded theme file");
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 3: Inline overrides
        if let Some(inline) = inline {
            layers.push(inline);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Inline,
                path: None,
                digest: None,
            });
        }

        // Merge all layers
        let merged = merge_all(layers);

        // Validate
        Self::validate_config(&merged)?;

        let fingerprint =
            fingerprint(&merged).map_err(|e| ConfigError::FingerprintError(e.to_string()))?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            fingerprint,
            config: merged,
            sources,
        })
    }

    /// Validate the palettes of a merged theme
    fn validate_config(config: &Value) -> Result<(), ConfigError> {
        for pointer in ["/theme/colors", "/theme/extend/colors"] {
            if let Some(colors) = config.pointer(pointer) {
                validate_colors(colors).map_err(|source| ConfigError::ValidationError {
                    pointer: pointer.to_string(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Hand the merged config to the resolver
    pub fn resolve(&self) -> Result<ResolvedTheme, ConfigError> {
        ResolvedTheme::new(self.config.clone())
            .map_err(|e| ConfigError::FingerprintError(e.to_string()))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Get a config value as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// The `theme.extend.colors` node
    pub fn colors(&self) -> Option<&Value> {
        self.config.pointer("/theme/extend/colors")
    }
}

/// Load and parse a JSON or TOML theme file, returning the value and digest
pub fn load_theme_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    // Compute digest
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let value = match extension.as_deref() {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
        Some("toml") => {
            let toml_value: toml::Value = toml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
            toml_to_json(toml_value)?
        }
        _ => {
            return Err(ConfigError::ParseError(format!(
                "Unsupported theme file (expected .json or .toml): {}",
                path.display()
            )))
        }
    };

    Ok((value, digest))
}

/// Convert TOML Value to JSON Value
///
/// JSON has no NaN or infinity, so a non-finite float is a parse error rather
/// than a null that would erase the value underneath it.
pub fn toml_to_json(toml: toml::Value) -> Result<Value, ConfigError> {
    Ok(match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| {
                ConfigError::ParseError(format!("TOML float {} has no JSON equivalent", f))
            })?,
        toml::Value::Boolean(b) => Value::Bool(b),
        // Datetimes stay atomic
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(toml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        toml::Value::Table(table) => {
            let mut map = serde_json::Map::new();
            for (key, value) in table {
                map.insert(key, toml_to_json(value)?);
            }
            Value::Object(map)
        }
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error at {pointer}: {source}")]
    ValidationError {
        pointer: String,
        #[source]
        source: PaletteError,
    },

    #[error("Fingerprint error: {0}")]
    FingerprintError(String),
}
