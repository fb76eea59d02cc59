//! Styled text drawing onto an RGBA surface.
//!
//! Takes the coverage buffers produced by [`crate::render::font`] and
//! blends them over the poster with the placeholder's fill color,
//! source-over. Multi-line text (`\n`) stacks at the face's line pitch;
//! alignment is applied per line relative to the anchor.

use image::{Rgba, RgbaImage};

use crate::geometry::Point;
use crate::render::font::{rasterize_line, ResolvedFace};
use crate::template::TextAlign;

/// Width in pixels of one line of text for this face and size.
pub fn measure_line(face: &ResolvedFace, text: &str, px_height: f32) -> usize {
    rasterize_line(face, text, px_height).width
}

/// Draw text with its top-left at `anchor` (alignment shifts each line
/// horizontally around the anchor's x).
pub fn draw_text(
    surface: &mut RgbaImage,
    face: &ResolvedFace,
    text: &str,
    px_height: f32,
    color: Rgba<u8>,
    align: TextAlign,
    anchor: Point,
) {
    let mut line_y = anchor.y;
    for line in text.split('\n') {
        let raster = rasterize_line(face, line, px_height);
        let line_x = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - (raster.width as i32) / 2,
            TextAlign::Right => anchor.x - raster.width as i32,
        };
        blit(surface, &raster.data, raster.width, raster.height, color, line_x, line_y);
        line_y += raster.height as i32;
    }
}

/// Blend a coverage buffer over the surface, source-over, clipping to the
/// surface bounds.
fn blit(
    surface: &mut RgbaImage,
    coverage: &[f32],
    width: usize,
    height: usize,
    color: Rgba<u8>,
    origin_x: i32,
    origin_y: i32,
) {
    let (surf_w, surf_h) = surface.dimensions();
    for cy in 0..height {
        let py = origin_y + cy as i32;
        if py < 0 || py >= surf_h as i32 {
            continue;
        }
        for cx in 0..width {
            let px = origin_x + cx as i32;
            if px < 0 || px >= surf_w as i32 {
                continue;
            }
            let cov = coverage[cy * width + cx];
            if cov <= 0.0 {
                continue;
            }
            let alpha = cov * (color[3] as f32 / 255.0);
            let dst = surface.get_pixel_mut(px as u32, py as u32);
            for c in 0..3 {
                let blended = color[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
                dst[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
            let out_a = alpha * 255.0 + dst[3] as f32 * (1.0 - alpha);
            dst[3] = out_a.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn bitmap_face() -> ResolvedFace {
        ResolvedFace::Bitmap {
            synth_bold: false,
            synth_italic: false,
        }
    }

    fn white_surface(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    fn count_pixels(surface: &RgbaImage, color: Rgba<u8>) -> usize {
        surface.pixels().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_draw_leaves_ink_in_color() {
        let mut surface = white_surface(200, 60);
        draw_text(
            &mut surface,
            &bitmap_face(),
            "Hi",
            24.0,
            RED,
            TextAlign::Left,
            Point::new(5, 5),
        );
        // Bitmap coverage is binary, so glyph pixels are the exact color.
        assert!(count_pixels(&surface, RED) > 0);
    }

    #[test]
    fn test_draw_clips_outside_surface() {
        let mut surface = white_surface(20, 20);
        draw_text(
            &mut surface,
            &bitmap_face(),
            "WWWWWWWW",
            24.0,
            RED,
            TextAlign::Left,
            Point::new(-50, -50),
        );
        // Must not panic; ink may or may not land depending on clip.
        assert_eq!(surface.dimensions(), (20, 20));
    }

    #[test]
    fn test_alignment_shifts_ink() {
        let text = "M";
        let px = 24.0;
        let mut left = white_surface(200, 40);
        let mut right = white_surface(200, 40);
        draw_text(&mut left, &bitmap_face(), text, px, RED, TextAlign::Left, Point::new(100, 5));
        draw_text(&mut right, &bitmap_face(), text, px, RED, TextAlign::Right, Point::new(100, 5));

        let leftmost_ink = |surface: &RgbaImage| {
            surface
                .enumerate_pixels()
                .filter(|(_, _, p)| **p == RED)
                .map(|(x, _, _)| x)
                .min()
                .unwrap()
        };
        assert!(leftmost_ink(&right) < leftmost_ink(&left));
    }

    #[test]
    fn test_center_alignment_straddles_anchor() {
        let mut surface = white_surface(200, 40);
        draw_text(
            &mut surface,
            &bitmap_face(),
            "MM",
            24.0,
            RED,
            TextAlign::Center,
            Point::new(100, 5),
        );
        let xs: Vec<u32> = surface
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == RED)
            .map(|(x, _, _)| x)
            .collect();
        let min = *xs.iter().min().unwrap();
        let max = *xs.iter().max().unwrap();
        assert!(min < 100 && max > 100, "ink [{}, {}] should straddle x=100", min, max);
    }

    #[test]
    fn test_multiline_stacks_downward() {
        let mut one = white_surface(100, 100);
        let mut two = white_surface(100, 100);
        draw_text(&mut one, &bitmap_face(), "A", 24.0, RED, TextAlign::Left, Point::new(5, 5));
        draw_text(&mut two, &bitmap_face(), "A\nA", 24.0, RED, TextAlign::Left, Point::new(5, 5));
        let lowest_ink = |surface: &RgbaImage| {
            surface
                .enumerate_pixels()
                .filter(|(_, _, p)| **p == RED)
                .map(|(_, y, _)| y)
                .max()
                .unwrap()
        };
        assert!(lowest_ink(&two) >= lowest_ink(&one) + 24);
    }

    #[test]
    fn test_measure_matches_raster_width() {
        let face = bitmap_face();
        let w = measure_line(&face, "Acme", 24.0);
        assert_eq!(w, rasterize_line(&face, "Acme", 24.0).width);
    }
}
