//! Built-in theme defaults (layer 1)
//!
//! The palettes every V-Pack component styles against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Shade levels of a color scale, lightest first.
pub const SHADE_LEVELS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// A color scale keyed by shade level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub BTreeMap<u16, String>);

impl Palette {
    /// Build a full scale, one color per entry of [`SHADE_LEVELS`]
    pub fn from_scale(colors: [&str; 10]) -> Self {
        Self(
            SHADE_LEVELS
                .iter()
                .zip(colors)
                .map(|(shade, color)| (*shade, color.to_string()))
                .collect(),
        )
    }

    pub fn shade(&self, level: u16) -> Option<&str> {
        self.0.get(&level).map(String::as_str)
    }

    /// Convert to a configuration subtree (`{"50": "#...", ...}`)
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(shade, color)| (shade.to_string(), Value::String(color.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Built-in default theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultTheme {
    /// Named palettes under `theme.extend.colors`
    pub palettes: BTreeMap<String, Palette>,
}

impl Default for DefaultTheme {
    fn default() -> Self {
        let palettes = [
            (
                "primary",
                [
                    "#EEF2FF", "#E1E7FC", "#C8D2FC", "#A4B3FD", "#7E85FB", "#605EF8", "#4C3BED",
                    "#412FCE", "#342AA4", "#312C81",
                ],
            ),
            (
                "secondary",
                [
                    "#F8FAFC", "#F1F5F9", "#E2E8F0", "#CBD5E1", "#94A3B8", "#64748B", "#475569",
                    "#334155", "#1E293B", "#0F172A",
                ],
            ),
            (
                "success",
                [
                    "#F0FDF4", "#DCFCE7", "#BBF7D0", "#86EFAC", "#4ADE80", "#22C55E", "#16A34A",
                    "#15803D", "#166534", "#14532D",
                ],
            ),
            (
                "warning",
                [
                    "#FFFBEB", "#FEF3C7", "#FDE68A", "#FCD34D", "#FBBF24", "#F59E0B", "#D97706",
                    "#B45309", "#92400E", "#78350F",
                ],
            ),
            (
                "danger",
                [
                    "#FEF2F2", "#FEE2E2", "#FECACA", "#FCA5A5", "#F87171", "#EF4444", "#DC2626",
                    "#B91C1C", "#991B1B", "#7F1D1D",
                ],
            ),
            (
                "gray",
                [
                    "#F9FAFB", "#F3F4F6", "#E5E7EB", "#D1D5DB", "#9CA3AF", "#6B7280", "#4B5563",
                    "#374151", "#1F2937", "#111827",
                ],
            ),
        ]
        .into_iter()
        .map(|(name, scale)| (name.to_string(), Palette::from_scale(scale)))
        .collect();

        Self { palettes }
    }
}

impl DefaultTheme {
    pub fn palette(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    pub fn palette_names(&self) -> Vec<&str> {
        self.palettes.keys().map(String::as_str).collect()
    }

    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> Value {
        let colors: Map<String, Value> = self
            .palettes
            .iter()
            .map(|(name, palette)| (name.clone(), palette.to_value()))
            .collect();

        serde_json::json!({
            "theme": {
                "extend": {
                    "colors": colors
                }
            }
        })
    }
}
