//! The placeholder model: one named, positioned, styled text slot.
//!
//! Placeholders are pure data. The two update operations are non-mutating:
//! the editor keeps the previous record for undo, so updates return a fresh
//! value instead of mutating in place.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Dimensions, Point, SpaceMap};
use crate::template::style::{StylePatch, TextStyle};

/// Horizontal flow of text from its anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One text slot on a poster template.
///
/// `token` holds either a render-time substitution pattern such as
/// `{companyname}` or a literal sample string typed during design. Position
/// and size are in whichever coordinate space is currently in force: preview
/// space while editing, native space once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// Unique identifier within the template (e.g. `companyName`).
    pub key: String,
    /// Top-left offset of the text box.
    pub position: Point,
    /// Bounding box of the text box (editor handle; rendering uses
    /// position + text metrics).
    pub size: Dimensions,
    /// Substitution token or design-time sample text.
    pub token: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub text_align: TextAlign,
}

impl Placeholder {
    /// Create a placeholder with default style and alignment.
    pub fn new(key: impl Into<String>, position: Point, size: Dimensions) -> Self {
        let key = key.into();
        Self {
            token: format!("{{{}}}", key.to_ascii_lowercase()),
            key,
            position,
            size,
            style: TextStyle::default(),
            text_align: TextAlign::default(),
        }
    }

    /// Return a copy with the design-time sample text replaced.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            token: text.into(),
            ..self.clone()
        }
    }

    /// Return a copy with a style patch merged in.
    ///
    /// Fails with `InvalidStyleKey`/`InvalidStyleValue` when the dynamic
    /// patch does not validate; the placeholder is left untouched.
    pub fn with_style(&self, patch: &serde_json::Value) -> Result<Self> {
        let patch = StylePatch::from_value(patch)?;
        Ok(self.with_style_patch(&patch))
    }

    /// Typed variant of [`Placeholder::with_style`] for Rust callers.
    pub fn with_style_patch(&self, patch: &StylePatch) -> Self {
        Self {
            style: patch.apply(&self.style),
            ..self.clone()
        }
    }

    /// Return a copy mapped into another coordinate space.
    ///
    /// Position and box follow the map; the font size follows the vertical
    /// ratio so text keeps its proportion to the poster.
    pub fn mapped(&self, map: &SpaceMap) -> Self {
        Self {
            position: map.map_point(self.position),
            size: map.map_dimensions(self.size),
            style: TextStyle {
                font_size_px: map.map_vertical(self.style.font_size_px),
                ..self.style.clone()
            },
            ..self.clone()
        }
    }
}
