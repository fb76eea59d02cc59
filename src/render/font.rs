//! Font resolution and glyph rasterization.
//!
//! Two glyph sources feed the compositor. Registered TTF/OTF faces
//! (`ab_glyph`) are matched by normalized family name and render
//! anti-aliased. When a style names a family with no registered face — the
//! common case, since templates say things like "Arial" — the built-in
//! Spleen PSF2 bitmap family takes over, scaled nearest-neighbor to the
//! requested pixel size. The bitmap path is fully deterministic, which is
//! what keeps editor preview and final render byte-identical across
//! machines.
//!
//! Bold and italic are honored by the registered face when one exists for
//! that variant; otherwise they are synthesized on the coverage buffer
//! (double-strike, row shear).

use std::collections::HashMap;

use ab_glyph::{Font, FontArc, ScaleFont};
use spleen_font::{PSF2Font, FONT_12X24, FONT_6X12};

use crate::error::{PosterError, Result};
use crate::resolve::normalize_key;
use crate::template::TextStyle;

/// Horizontal offset per vertical pixel for synthetic italic (~11°).
const ITALIC_SHEAR: f32 = 0.2;

/// One rasterized line of text as an anti-aliased coverage buffer.
///
/// Intensity values: 0.0 = untouched, 1.0 = fully covered.
pub struct LineRaster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl LineRaster {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }
}

/// The glyph source chosen for a style, plus which variants must be
/// synthesized because no matching face is registered.
pub enum ResolvedFace {
    Ttf {
        font: FontArc,
        synth_bold: bool,
        synth_italic: bool,
    },
    Bitmap {
        synth_bold: bool,
        synth_italic: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    bold: bool,
    italic: bool,
}

/// Runtime-registered TTF/OTF faces, keyed by normalized family name.
///
/// An empty registry is valid: every style then resolves to the bitmap
/// path, so rendering never fails on fonts.
#[derive(Default, Clone)]
pub struct FontRegistry {
    faces: HashMap<FaceKey, FontArc>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes for a family variant.
    pub fn register(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| PosterError::Font(format!("invalid font data for '{}': {}", family, e)))?;
        self.faces.insert(
            FaceKey {
                family: normalize_key(family),
                bold,
                italic,
            },
            font,
        );
        Ok(())
    }

    /// Pick the glyph source for a style.
    ///
    /// Tries the exact variant, then the family's regular face (with
    /// synthetic bold/italic), then the bitmap fallback.
    pub fn resolve(&self, style: &TextStyle) -> ResolvedFace {
        let family = normalize_key(&style.font_family);
        let exact = FaceKey {
            family: family.clone(),
            bold: style.bold,
            italic: style.italic,
        };
        if let Some(font) = self.faces.get(&exact) {
            return ResolvedFace::Ttf {
                font: font.clone(),
                synth_bold: false,
                synth_italic: false,
            };
        }
        let regular = FaceKey {
            family,
            bold: false,
            italic: false,
        };
        if let Some(font) = self.faces.get(&regular) {
            return ResolvedFace::Ttf {
                font: font.clone(),
                synth_bold: style.bold,
                synth_italic: style.italic,
            };
        }
        ResolvedFace::Bitmap {
            synth_bold: style.bold,
            synth_italic: style.italic,
        }
    }
}

/// Rasterize one line of text at the given pixel height.
///
/// The buffer height is the face's line height for that size, so stacked
/// lines of the same style align on a constant pitch.
pub fn rasterize_line(face: &ResolvedFace, text: &str, px_height: f32) -> LineRaster {
    let raster = match face {
        ResolvedFace::Ttf { font, .. } => rasterize_ttf(font, text, px_height),
        ResolvedFace::Bitmap { .. } => rasterize_bitmap(text, px_height),
    };
    let (synth_bold, synth_italic) = match face {
        ResolvedFace::Ttf {
            synth_bold,
            synth_italic,
            ..
        }
        | ResolvedFace::Bitmap {
            synth_bold,
            synth_italic,
        } => (*synth_bold, *synth_italic),
    };

    let raster = if synth_bold { double_strike(raster) } else { raster };
    if synth_italic { shear(raster) } else { raster }
}

fn rasterize_ttf(font: &FontArc, text: &str, px_height: f32) -> LineRaster {
    let scaled = font.as_scaled(px_height);

    // Layout: compute glyph positions
    let mut glyphs = Vec::new();
    let mut caret_x = 0.0f32;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        let advance = scaled.h_advance(glyph_id);
        glyphs.push((glyph_id, caret_x));
        caret_x += advance;
    }

    let width = (caret_x.ceil() as usize).max(1);
    let ascent = scaled.ascent();
    let descent = scaled.descent();
    let height = ((ascent - descent).ceil() as usize).max(1);
    let baseline_y = ascent;

    let mut raster = LineRaster::blank(width, height);

    for &(glyph_id, glyph_x) in &glyphs {
        let glyph =
            glyph_id.with_scale_and_position(px_height, ab_glyph::point(glyph_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    let idx = y as usize * width + x as usize;
                    // Accumulate coverage (clamped)
                    raster.data[idx] = (raster.data[idx] + coverage).min(1.0);
                }
            });
        }
    }

    raster
}

fn rasterize_bitmap(text: &str, px_height: f32) -> LineRaster {
    let px = px_height.round().max(1.0) as usize;
    // Small sizes use Spleen 6x12, everything else 12x24; the source cell
    // is scaled nearest-neighbor to the target height, width following
    // the source aspect.
    let use_small = px < 16;
    let (src_w, src_h) = if use_small { (6usize, 12usize) } else { (12usize, 24usize) };
    let dst_h = px;
    let dst_w = ((src_w as f32 / src_h as f32) * px as f32).round().max(1.0) as usize;

    let chars: Vec<char> = text.chars().collect();
    let width = (chars.len() * dst_w).max(1);
    let mut raster = LineRaster::blank(width, dst_h);

    let mut spleen = if use_small {
        PSF2Font::new(FONT_6X12).unwrap()
    } else {
        PSF2Font::new(FONT_12X24).unwrap()
    };

    for (i, &ch) in chars.iter().enumerate() {
        let mut src_bitmap = vec![0u8; src_w * src_h];
        let utf8 = ch.to_string();
        let mut found = false;

        if let Some(glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) {
            found = true;
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < src_h && col_x < src_w {
                        src_bitmap[row_y * src_w + col_x] = if on { 1 } else { 0 };
                    }
                }
            }
        }

        if !found {
            // Box outline for unknown chars
            for x in 0..src_w {
                src_bitmap[x] = 1;
                src_bitmap[(src_h - 1) * src_w + x] = 1;
            }
            for y in 0..src_h {
                src_bitmap[y * src_w] = 1;
                src_bitmap[y * src_w + src_w - 1] = 1;
            }
        }

        // Scale into the character cell using nearest neighbor
        let cell_x = i * dst_w;
        for dy in 0..dst_h {
            for dx in 0..dst_w {
                let sx = dx * src_w / dst_w;
                let sy = dy * src_h / dst_h;
                if src_bitmap[sy * src_w + sx] != 0 {
                    raster.data[dy * width + cell_x + dx] = 1.0;
                }
            }
        }
    }

    raster
}

/// Synthetic bold: overlay the buffer shifted one pixel right.
fn double_strike(src: LineRaster) -> LineRaster {
    let width = src.width + 1;
    let mut out = LineRaster::blank(width, src.height);
    for y in 0..src.height {
        for x in 0..src.width {
            let v = src.data[y * src.width + x];
            if v > 0.0 {
                let idx = y * width + x;
                out.data[idx] = out.data[idx].max(v);
                out.data[idx + 1] = out.data[idx + 1].max(v);
            }
        }
    }
    out
}

/// Synthetic italic: shear rows right, more toward the top.
fn shear(src: LineRaster) -> LineRaster {
    let max_offset = ((src.height as f32) * ITALIC_SHEAR).ceil() as usize;
    let width = src.width + max_offset;
    let mut out = LineRaster::blank(width, src.height);
    for y in 0..src.height {
        let offset = (((src.height - 1 - y) as f32) * ITALIC_SHEAR).round() as usize;
        for x in 0..src.width {
            let v = src.data[y * src.width + x];
            if v > 0.0 {
                out.data[y * width + x + offset] = v;
            }
        }
    }
    out
}
