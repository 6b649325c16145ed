//! Theme catalog: names, labels and full color palettes.
//!
//! # Responsibility
//! - Keep every displayable color constant for the five shipped themes.
//! - Map persisted theme identifiers back to palettes.
//!
//! # Invariants
//! - Identifier strings are part of the persisted format and must not change.
//! - Lookup misses always resolve to the default palette, never an error.

use serde::{Deserialize, Serialize};

/// The five shipped themes, identified by their persisted id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeName {
    Default,
    PurpleNebula,
    DeepSpace,
    CosmicRose,
    Love,
}

/// Full display palette for one theme.
///
/// Colors are CSS-style hex strings; `blur_tint` is an `rgba(...)` string
/// because the host blur overlay needs the alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub card_background: &'static str,
    pub accent: &'static str,
    pub border_color: &'static str,
    pub button_secondary: &'static str,
    pub input_background: &'static str,
    pub font_family: &'static str,
    pub frame_color: &'static str,
    pub blur_tint: &'static str,
}

impl ThemeName {
    /// All themes in settings-screen display order.
    pub fn all() -> [ThemeName; 5] {
        [
            Self::Default,
            Self::PurpleNebula,
            Self::DeepSpace,
            Self::CosmicRose,
            Self::Love,
        ]
    }

    /// Resolves a persisted or user-selected identifier.
    ///
    /// Unknown identifiers yield `None`; callers treat that as "keep current
    /// theme", never as an error.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "default" => Some(Self::Default),
            "purpleNebula" => Some(Self::PurpleNebula),
            "deepSpace" => Some(Self::DeepSpace),
            "cosmicRose" => Some(Self::CosmicRose),
            "love" => Some(Self::Love),
            _ => None,
        }
    }

    /// The identifier persisted to the store.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PurpleNebula => "purpleNebula",
            Self::DeepSpace => "deepSpace",
            Self::CosmicRose => "cosmicRose",
            Self::Love => "love",
        }
    }

    /// Human-readable label shown in the theme picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Classic Light",
            Self::PurpleNebula => "Purple Nebula",
            Self::DeepSpace => "Deep Space Dark",
            Self::CosmicRose => "Cosmic Rose",
            Self::Love => "Love Theme",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Default => Palette {
                background: "#0d0d0d",
                text: "#fff",
                text_secondary: "#aaa",
                card_background: "#1f1f1f",
                accent: "#E91E63",
                border_color: "#444",
                button_secondary: "#333",
                input_background: "#2a2a2a",
                font_family: "System",
                frame_color: "#ffffff",
                blur_tint: "rgba(255, 255, 255, 0.1)",
            },
            Self::PurpleNebula => Palette {
                background: "#1b0c2e",
                text: "#fff",
                text_secondary: "#b8a3d8",
                card_background: "#2a1747",
                accent: "#a020f0",
                border_color: "#6a5acd",
                button_secondary: "#382359",
                input_background: "#321c4d",
                font_family: "ChocoCooky",
                frame_color: "#9370db",
                blur_tint: "rgba(147, 112, 219, 0.2)",
            },
            Self::DeepSpace => Palette {
                background: "#050a0e",
                text: "#fff",
                text_secondary: "#a3c2d8",
                card_background: "#0f1a24",
                accent: "#008080",
                border_color: "#005f5f",
                button_secondary: "#1a2c3d",
                input_background: "#152532",
                font_family: "System",
                frame_color: "#4b0082",
                blur_tint: "rgba(25, 25, 25, 0.3)",
            },
            Self::CosmicRose => Palette {
                background: "#2d0a1d",
                text: "#fff",
                text_secondary: "#d8a3b8",
                card_background: "#4f1431",
                accent: "#ff69b4",
                border_color: "#c71585",
                button_secondary: "#591c38",
                input_background: "#4d1c32",
                font_family: "System",
                frame_color: "#ff69b4",
                blur_tint: "rgba(255, 105, 180, 0.2)",
            },
            Self::Love => Palette {
                background: "#330a0a",
                text: "#fff",
                text_secondary: "#d8a3a3",
                card_background: "#4f0f0f",
                accent: "#ff3b3b",
                border_color: "#e32222",
                button_secondary: "#591c1c",
                input_background: "#4d1c1c",
                font_family: "ChocoCooky",
                frame_color: "#ff1493",
                blur_tint: "rgba(255, 20, 147, 0.2)",
            },
        }
    }
}

impl Default for ThemeName {
    fn default() -> Self {
        Self::Default
    }
}
