//! Text style records and the font descriptor encoder.
//!
//! A [`TextStyle`] is stored structured on every placeholder; the renderer
//! never parses a descriptor back. [`TextStyle::font_descriptor`] produces
//! the one-directional, deterministic encoding consumed by the raster path
//! (and handy for diffing in tests): italic flag first if set, then bold,
//! then size, then family — e.g. `italic bold 32px Georgia`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PosterError, Result};

/// Font size applied when a style carries a non-positive or non-finite size.
pub const DEFAULT_FONT_SIZE_PX: f32 = 20.0;

/// Family used when none is supplied.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Fill color used when none is supplied (and substituted on degradation).
pub const DEFAULT_COLOR: &str = "#000000";

/// Visual style of one placeholder's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Font size in pixels, in the coordinate space of the placeholder.
    pub font_size_px: f32,
    pub font_family: String,
    /// CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa`, or a basic name.
    pub color: String,
    pub bold: bool,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size_px: DEFAULT_FONT_SIZE_PX,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: DEFAULT_COLOR.to_string(),
            bold: false,
            italic: false,
        }
    }
}

impl TextStyle {
    /// Font size with the non-positive/non-finite guard applied.
    pub fn effective_size_px(&self) -> f32 {
        if self.font_size_px.is_finite() && self.font_size_px > 0.0 {
            self.font_size_px
        } else {
            DEFAULT_FONT_SIZE_PX
        }
    }

    /// Encode this style as a renderer-consumable font descriptor.
    ///
    /// Token order is fixed (italic, bold, size, family) so repeated calls
    /// are byte-stable. Invalid sizes encode as the default rather than
    /// producing a nonsense descriptor.
    pub fn font_descriptor(&self) -> String {
        let mut descriptor = String::new();
        if self.italic {
            descriptor.push_str("italic ");
        }
        if self.bold {
            descriptor.push_str("bold ");
        }
        descriptor.push_str(&format!(
            "{}px {}",
            self.effective_size_px(),
            self.font_family
        ));
        descriptor
    }
}

/// Partial style update applied by the editor.
///
/// Every field is optional; set fields overwrite, unset fields keep the
/// current value. Unknown keys are rejected (see [`StylePatch::from_value`])
/// so the editor and the renderer cannot silently drift apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct StylePatch {
    pub font_size_px: Option<f32>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl StylePatch {
    /// Validate a dynamic JSON patch (as sent by the design surface).
    ///
    /// Returns [`PosterError::InvalidStyleKey`] for a key the renderer does
    /// not understand, and [`PosterError::InvalidStyleValue`] for a known
    /// key carrying a value of the wrong shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                return Err(PosterError::InvalidStyleValue {
                    key: "<patch>".to_string(),
                    reason: "style patch must be a JSON object".to_string(),
                });
            }
        };

        let mut patch = StylePatch::default();
        for (key, val) in obj {
            match key.as_str() {
                "fontSizePx" => {
                    patch.font_size_px = Some(expect_number(key, val)?);
                }
                "fontFamily" => {
                    patch.font_family = Some(expect_string(key, val)?);
                }
                "color" => {
                    patch.color = Some(expect_string(key, val)?);
                }
                "bold" => {
                    patch.bold = Some(expect_bool(key, val)?);
                }
                "italic" => {
                    patch.italic = Some(expect_bool(key, val)?);
                }
                other => return Err(PosterError::InvalidStyleKey(other.to_string())),
            }
        }
        Ok(patch)
    }

    /// Merge this patch over `base`, returning the updated style.
    pub fn apply(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            font_size_px: self.font_size_px.unwrap_or(base.font_size_px),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| base.font_family.clone()),
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            bold: self.bold.unwrap_or(base.bold),
            italic: self.italic.unwrap_or(base.italic),
        }
    }
}

fn expect_number(key: &str, val: &Value) -> Result<f32> {
    val.as_f64()
        .map(|n| n as f32)
        .ok_or_else(|| PosterError::InvalidStyleValue {
            key: key.to_string(),
            reason: format!("expected a number, got {}", val),
        })
}

fn expect_string(key: &str, val: &Value) -> Result<String> {
    val.as_str()
        .map(str::to_string)
        .ok_or_else(|| PosterError::InvalidStyleValue {
            key: key.to_string(),
            reason: format!("expected a string, got {}", val),
        })
}

fn expect_bool(key: &str, val: &Value) -> Result<bool> {
    val.as_bool().ok_or_else(|| PosterError::InvalidStyleValue {
        key: key.to_string(),
        reason: format!("expected a boolean, got {}", val),
    })
}
