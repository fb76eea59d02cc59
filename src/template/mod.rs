//! # Poster Template Model
//!
//! A [`PosterTemplate`] is a base poster image plus its ordered set of
//! [`Placeholder`] text slots, reusable across many customers. Native
//! dimensions are captured once when the poster is uploaded (from the
//! decoded image, never from the preview) and never recomputed; stored
//! placeholders are always in native image coordinates.

pub mod placeholder;
pub mod style;

pub use placeholder::{Placeholder, TextAlign};
pub use style::{StylePatch, TextStyle};

use serde::{Deserialize, Serialize};

use crate::geometry::Dimensions;

/// Width cap for the interactive editor preview, in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 400;

/// Fixed campaign categories a poster belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterCategory {
    #[default]
    Offers,
    Events,
    Festivals,
}

/// A poster image plus its placeholder set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterTemplate {
    #[serde(default)]
    pub category: PosterCategory,
    /// Address of the base image (path or URL). Immutable once created.
    pub image_ref: String,
    /// Pixel size of the original uploaded image.
    pub native_dimensions: Dimensions,
    /// Placeholders in native coordinates. Order matters: later entries
    /// draw on top when boxes overlap.
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

impl PosterTemplate {
    pub fn new(image_ref: impl Into<String>, native_dimensions: Dimensions) -> Self {
        Self {
            category: PosterCategory::default(),
            image_ref: image_ref.into(),
            native_dimensions,
            placeholders: Vec::new(),
        }
    }

    /// Editor preview size: native dimensions scaled down so the width
    /// fits `max_width`, aspect ratio preserved. Posters already narrower
    /// than the cap preview at native size.
    pub fn preview_dimensions(&self, max_width: u32) -> Dimensions {
        let native = self.native_dimensions;
        if native.width <= max_width || native.width == 0 {
            return native;
        }
        let scale = max_width as f64 / native.width as f64;
        Dimensions {
            width: max_width,
            height: (native.height as f64 * scale).round().max(1.0) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_dimensions_caps_width() {
        let template = PosterTemplate::new("poster.png", Dimensions::new(1200, 1680));
        assert_eq!(
            template.preview_dimensions(PREVIEW_MAX_WIDTH),
            Dimensions::new(400, 560)
        );
    }

    #[test]
    fn test_preview_dimensions_keeps_small_posters() {
        let template = PosterTemplate::new("poster.png", Dimensions::new(320, 200));
        assert_eq!(
            template.preview_dimensions(PREVIEW_MAX_WIDTH),
            Dimensions::new(320, 200)
        );
    }

    #[test]
    fn test_category_serde_is_lowercase() {
        let json = serde_json::to_string(&PosterCategory::Festivals).unwrap();
        assert_eq!(json, "\"festivals\"");
        let back: PosterCategory = serde_json::from_str("\"events\"").unwrap();
        assert_eq!(back, PosterCategory::Events);
    }

    #[test]
    fn test_template_deserializes_spec_shape() {
        let template: PosterTemplate = serde_json::from_str(
            r#"{
                "category": "offers",
                "imageRef": "https://example.com/base.png",
                "nativeDimensions": {"width": 1080, "height": 1920},
                "placeholders": []
            }"#,
        )
        .unwrap();
        assert_eq!(template.native_dimensions, Dimensions::new(1080, 1920));
        assert!(template.placeholders.is_empty());
    }
}
