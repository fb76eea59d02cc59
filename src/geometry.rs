//! Coordinate spaces and the preview↔native mapper.
//!
//! Poster templates live in two coordinate spaces: the editor positions
//! placeholders on a scaled-down *preview* of the uploaded image, while the
//! final render happens at the image's *native* resolution. [`SpaceMap`]
//! converts points and sizes between the two. The map must be applied
//! exactly once per persist operation — placeholders stored on a
//! [`PosterTemplate`](crate::template::PosterTemplate) are always native
//! space, and the preview renderer applies the inverse at draw time.

use serde::{Deserialize, Serialize};

/// A point in either coordinate space, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of an image or a placeholder bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Linear scale between two coordinate spaces.
///
/// Built from the dimensions of the source and destination spaces; a zero
/// source dimension yields a scale of 1 on that axis (no-op) rather than a
/// division by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceMap {
    scale_x: f64,
    scale_y: f64,
}

impl SpaceMap {
    /// Map from `from`-space coordinates to `to`-space coordinates.
    ///
    /// For the editor save path, `from` is the preview size and `to` the
    /// native size.
    pub fn new(from: Dimensions, to: Dimensions) -> Self {
        Self {
            scale_x: axis_scale(from.width, to.width),
            scale_y: axis_scale(from.height, to.height),
        }
    }

    /// The map in the opposite direction.
    pub fn inverse(&self) -> Self {
        Self {
            scale_x: safe_recip(self.scale_x),
            scale_y: safe_recip(self.scale_y),
        }
    }

    /// Scale a point, rounding to the nearest pixel.
    pub fn map_point(&self, p: Point) -> Point {
        Point {
            x: (p.x as f64 * self.scale_x).round() as i32,
            y: (p.y as f64 * self.scale_y).round() as i32,
        }
    }

    /// Scale a bounding box, rounding to the nearest pixel.
    pub fn map_dimensions(&self, d: Dimensions) -> Dimensions {
        Dimensions {
            width: (d.width as f64 * self.scale_x).round() as u32,
            height: (d.height as f64 * self.scale_y).round() as u32,
        }
    }

    /// Scale a vertical length (font sizes follow the vertical ratio).
    pub fn map_vertical(&self, len: f32) -> f32 {
        (len as f64 * self.scale_y) as f32
    }
}

fn axis_scale(from: u32, to: u32) -> f64 {
    if from == 0 {
        1.0
    } else {
        to as f64 / from as f64
    }
}

fn safe_recip(scale: f64) -> f64 {
    if scale == 0.0 { 1.0 } else { 1.0 / scale }
}

/// Convert a preview-space point to native space.
pub fn to_native(p: Point, preview: Dimensions, native: Dimensions) -> Point {
    SpaceMap::new(preview, native).map_point(p)
}

/// Convert a native-space point back to preview space.
pub fn to_preview(p: Point, native: Dimensions, preview: Dimensions) -> Point {
    SpaceMap::new(native, preview).map_point(p)
}
