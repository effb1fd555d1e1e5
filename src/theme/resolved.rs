//! A merged theme, ready to hand to the styling engine.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use vpack_merge::merge;

use super::palette::DEFAULT_SHADE;
use super::ThemeError;

/// Compute the fingerprint of a configuration tree
///
/// fingerprint = SHA-256 hex digest of JCS(tree), so key order never matters.
pub fn fingerprint(value: &Value) -> Result<String, ThemeError> {
    let jcs_bytes = serde_json_canonicalizer::to_vec(value)
        .map_err(|e| ThemeError::Fingerprint(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&jcs_bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// The effective theme configuration.
///
/// Immutable once built; the provider shares it behind an `Arc`.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTheme {
    config: Value,
    colors: Value,
    /// Color token (`brand-blue-500`) -> color
    tokens: BTreeMap<String, String>,
    fingerprint: String,
}

impl ResolvedTheme {
    pub fn new(config: Value) -> Result<Self, ThemeError> {
        let fingerprint = fingerprint(&config)?;
        let colors = effective_colors(&config);
        let tokens = flatten_colors(&colors);
        Ok(Self {
            config,
            colors,
            tokens,
            fingerprint,
        })
    }

    /// The merged configuration tree, unmodified
    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// `theme.colors` with `theme.extend.colors` merged on top
    pub fn colors(&self) -> &Value {
        &self.colors
    }

    /// Every resolvable color token, sorted
    pub fn tokens(&self) -> &BTreeMap<String, String> {
        &self.tokens
    }

    /// Sorted top-level color names
    pub fn palette_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .colors
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Resolve a color token (`primary-500`, `white`, `brand-blue-300`).
    ///
    /// A palette referenced without a shade resolves to its `DEFAULT` entry.
    pub fn color(&self, token: &str) -> Option<&str> {
        self.tokens.get(token.trim()).map(String::as_str)
    }
}

fn effective_colors(config: &Value) -> Value {
    let base = config.pointer("/theme/colors").unwrap_or(&Value::Null);
    let extend = config
        .pointer("/theme/extend/colors")
        .unwrap_or(&Value::Null);
    merge(base, extend)
}

/// Flatten nested palettes into dash-joined tokens.
///
/// On a token collision the shallower path wins, so a flat `brand-dark`
/// color beats shade `dark` of palette `brand`.
fn flatten_colors(colors: &Value) -> BTreeMap<String, String> {
    let mut tokens: BTreeMap<String, (usize, String)> = BTreeMap::new();
    if let Value::Object(map) = colors {
        for (name, entry) in map {
            collect_tokens(name.clone(), 1, entry, &mut tokens);
        }
    }
    tokens
        .into_iter()
        .map(|(token, (_, color))| (token, color))
        .collect()
}

fn collect_tokens(
    path: String,
    depth: usize,
    entry: &Value,
    tokens: &mut BTreeMap<String, (usize, String)>,
) {
    match entry {
        Value::String(color) => match tokens.entry(path) {
            Entry::Vacant(slot) => {
                slot.insert((depth, color.clone()));
            }
            Entry::Occupied(mut slot) => {
                if depth < slot.get().0 {
                    slot.insert((depth, color.clone()));
                }
            }
        },
        Value::Object(shades) => {
            for (shade, value) in shades {
                let child = if shade == DEFAULT_SHADE {
                    path.clone()
                } else {
                    format!("{}-{}", path, shade)
                };
                collect_tokens(child, depth + 1, value, tokens);
            }
        }
        // Non-color leaves are not resolvable
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn theme() -> ResolvedTheme {
        ResolvedTheme::new(json!({
            "theme": {
                "colors": {
                    "white": "#FFFFFF",
                    "primary": {"500": "#000000", "900": "#111111"}
                },
                "extend": {
                    "colors": {
                        "primary": {"500": "#605EF8", "DEFAULT": "#605EF8"},
                        "brand-blue": {"300": "#93C5FD"},
                        "brand-dark": "#0B0B0B"
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_extend_overrides_base_colors() {
        let theme = theme();
        assert_eq!(theme.color("primary-500"), Some("#605EF8"));
        assert_eq!(theme.color("primary-900"), Some("#111111"));
    }

    #[test]
    fn test_flat_and_default_colors() {
        let theme = theme();
        assert_eq!(theme.color("white"), Some("#FFFFFF"));
        assert_eq!(theme.color("primary"), Some("#605EF8"));
        assert_eq!(theme.color("brand-dark"), Some("#0B0B0B"));
        assert_eq!(theme.color("brand-blue-300"), Some("#93C5FD"));
        assert_eq!(theme.color(" primary-900 "), Some("#111111"));
    }

    #[test]
    fn test_nested_palettes_resolve() {
        let theme = ResolvedTheme::new(json!({"theme": {"extend": {"colors": {
            "brand": {
                "blue": {"500": "#3B82F6", "DEFAULT": "#2563EB"},
                "dark": "#222222"
            },
            "brand-dark": "#0B0B0B",
            "primary": {"light": "#EEF2FF"}
        }}}}))
        .unwrap();

        assert_eq!(theme.color("brand-blue-500"), Some("#3B82F6"));
        assert_eq!(theme.color("brand-blue"), Some("#2563EB"));
        assert_eq!(theme.color("primary-light"), Some("#EEF2FF"));
        // The flat color shadows the nested shade of the same name
        assert_eq!(theme.color("brand-dark"), Some("#0B0B0B"));
        assert_eq!(theme.color("brand"), None);
    }

    #[test]
    fn test_unknown_colors() {
        let theme = theme();
        assert_eq!(theme.color("primary-50"), None);
        assert_eq!(theme.color("white-500"), None);
        assert_eq!(theme.color("missing"), None);
        assert_eq!(theme.color("brand-blue"), None);
        assert_eq!(theme.color(""), None);
    }

    #[test]
    fn test_tokens_listing() {
        let theme = theme();
        let tokens: Vec<&str> = theme.tokens().keys().map(String::as_str).collect();
        assert_eq!(
            tokens,
            vec![
                "brand-blue-300",
                "brand-dark",
                "primary",
                "primary-500",
                "primary-900",
                "white"
            ]
        );
    }

    #[test]
    fn test_palette_names_sorted() {
        assert_eq!(
            theme().palette_names(),
            vec!["brand-blue", "brand-dark", "primary", "white"]
        );
    }

    #[test]
    fn test_no_colors() {
        let theme = ResolvedTheme::new(json!({"theme": {}})).unwrap();
        assert!(theme.colors().is_null());
        assert!(theme.palette_names().is_empty());
        assert!(theme.tokens().is_empty());
        assert_eq!(theme.color("primary-500"), None);
    }

    #[test]
    fn test_fingerprint_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{"a": 1, "b": {"c": 2, "d": 3}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b": {"d": 3, "c": 2}, "a": 1}"#).unwrap();
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
        assert_ne!(
            fingerprint(&a).unwrap(),
            fingerprint(&json!({"a": 2})).unwrap()
        );
        assert_eq!(fingerprint(&a).unwrap().len(), 64);
    }
}
