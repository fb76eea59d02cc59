//! The raster compositor: base image + resolved placeholders → final poster.
//!
//! This is the one drawing path shared by the editor preview and the
//! customer-facing render, so position, inset, and style handling cannot
//! diverge between the two. Composition is synchronous and pure: the base
//! image is already decoded by the time this module runs.

use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use tracing::warn;

use crate::geometry::{Dimensions, Point};
use crate::render::font::FontRegistry;
use crate::render::text::draw_text;
use crate::render::{RenderWarning, WarningKind};
use crate::resolve::ResolvedPlaceholder;
use crate::template::style::DEFAULT_COLOR;

/// Horizontal and vertical inset between a placeholder's box corner and
/// its text, matching the editor's visual preview.
pub const TEXT_INSET: i32 = 5;

/// Composite resolved placeholders over a base image.
///
/// The output surface is exactly `output_size`; the base image is
/// stretched to fit (native dimensions were captured from this exact
/// image, so the stretch is normally a no-op). Placeholders draw in list
/// order — later entries land on top. Empty text draws nothing. A
/// placeholder with an unparseable color degrades to the default color and
/// is reported in the warnings list; it never aborts the render.
pub fn compose(
    base: &DynamicImage,
    output_size: Dimensions,
    placeholders: &[ResolvedPlaceholder],
    fonts: &FontRegistry,
) -> (RgbaImage, Vec<RenderWarning>) {
    let mut surface = if (base.width(), base.height()) == (output_size.width, output_size.height) {
        base.to_rgba8()
    } else {
        base.resize_exact(output_size.width, output_size.height, FilterType::Lanczos3)
            .to_rgba8()
    };

    let mut warnings = Vec::new();

    for placeholder in placeholders {
        if placeholder.text.is_empty() {
            continue;
        }

        let color = match parse_color(&placeholder.style.color) {
            Some(color) => color,
            None => {
                warn!(
                    key = %placeholder.key,
                    color = %placeholder.style.color,
                    "unparseable placeholder color, using default"
                );
                warnings.push(RenderWarning {
                    key: placeholder.key.clone(),
                    kind: WarningKind::InvalidColor,
                    message: format!(
                        "color '{}' is not valid, substituted {}",
                        placeholder.style.color, DEFAULT_COLOR
                    ),
                });
                parse_color(DEFAULT_COLOR).unwrap_or(Rgba([0, 0, 0, 255]))
            }
        };

        let face = fonts.resolve(&placeholder.style);
        let anchor = Point::new(
            placeholder.position.x + TEXT_INSET,
            placeholder.position.y + TEXT_INSET,
        );
        draw_text(
            &mut surface,
            &face,
            &placeholder.text,
            placeholder.style.effective_size_px(),
            color,
            placeholder.text_align,
            anchor,
        );
    }

    (surface, warnings)
}

/// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa`, or one of the
/// basic names the poster dashboards actually use.
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    let value = value.trim().to_ascii_lowercase();

    let named = match value.as_str() {
        "black" => Some([0, 0, 0]),
        "white" => Some([255, 255, 255]),
        "red" => Some([255, 0, 0]),
        "green" => Some([0, 128, 0]),
        "blue" => Some([0, 0, 255]),
        "yellow" => Some([255, 255, 0]),
        "gray" | "grey" => Some([128, 128, 128]),
        "orange" => Some([255, 165, 0]),
        "purple" => Some([128, 0, 128]),
        _ => None,
    };
    if let Some([r, g, b]) = named {
        return Some(Rgba([r, g, b, 255]));
    }

    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let d = c.to_digit(16).unwrap() as u8;
                d * 16 + d
            });
            Some(Rgba([
                channels.next().unwrap(),
                channels.next().unwrap(),
                channels.next().unwrap(),
                255,
            ]))
        }
        6 | 8 => {
            let byte_at = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            let r = byte_at(0)?;
            let g = byte_at(2)?;
            let b = byte_at(4)?;
            let a = if hex.len() == 8 { byte_at(6)? } else { 255 };
            Some(Rgba([r, g, b, a]))
        }
        _ => None,
    }
}
