//! # Render Tests
//!
//! End-to-end tests of the public render surface: template + customer
//! fields in, finished poster out. Base images are written to temp files
//! so the suite runs offline; the timeout scenario uses a local listener
//! that never answers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use posterforge::error::PosterError;
use posterforge::geometry::{Dimensions, Point};
use posterforge::render::{render, render_many, render_preview, RenderContext};
use posterforge::template::{Placeholder, PosterTemplate, StylePatch};

const BASE_COLOR: Rgba<u8> = Rgba([220, 220, 220, 255]);

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Write a solid base poster image and return its path.
fn write_base_image(dir: &TempDir, width: u32, height: u32) -> String {
    let path = dir.path().join("base.png");
    RgbaImage::from_pixel(width, height, BASE_COLOR)
        .save(&path)
        .expect("write base image");
    path.to_str().unwrap().to_string()
}

/// Template over a freshly written base image of the given size.
fn template_with_base(dir: &TempDir, width: u32, height: u32) -> PosterTemplate {
    PosterTemplate::new(write_base_image(dir, width, height), Dimensions::new(width, height))
}

fn placeholder_at(key: &str, x: i32, y: i32, color: &str) -> Placeholder {
    Placeholder::new(key, Point::new(x, y), Dimensions::new(300, 60))
        .with_style_patch(&StylePatch {
            color: Some(color.to_string()),
            font_size_px: Some(32.0),
            ..Default::default()
        })
}

fn customer(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn has_color(image: &RgbaImage, color: Rgba<u8>) -> bool {
    image.pixels().any(|&p| p == color)
}

// ============================================================================
// RENDER
// ============================================================================

#[tokio::test]
async fn render_without_placeholders_returns_base_at_native_size() {
    let dir = TempDir::new().unwrap();
    let template = template_with_base(&dir, 400, 560);
    let ctx = RenderContext::new().unwrap();

    let outcome = render(&ctx, &template, &HashMap::new()).await.unwrap();
    assert_eq!(outcome.image.dimensions(), (400, 560));
    assert!(outcome.warnings.is_empty());
    assert!(outcome.image.pixels().all(|&p| p == BASE_COLOR));
}

#[tokio::test]
async fn render_burns_customer_text_into_poster() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 600, 400);
    template
        .placeholders
        .push(placeholder_at("companyName", 50, 50, "#ff0000"));
    let ctx = RenderContext::new().unwrap();

    let outcome = render(&ctx, &template, &customer(&[("companyName", "Acme")]))
        .await
        .unwrap();
    assert!(outcome.warnings.is_empty());
    assert!(has_color(&outcome.image, Rgba([255, 0, 0, 255])));
}

#[tokio::test]
async fn render_skips_unset_fields_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 600, 400);
    template
        .placeholders
        .push(placeholder_at("website", 50, 50, "#ff0000"));
    let ctx = RenderContext::new().unwrap();

    let outcome = render(&ctx, &template, &HashMap::new()).await.unwrap();
    // Unresolvable token → empty text → pristine base, no error.
    assert!(outcome.warnings.is_empty());
    assert!(outcome.image.pixels().all(|&p| p == BASE_COLOR));
}

#[tokio::test]
async fn render_reports_degraded_placeholder_and_continues() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 600, 400);
    template
        .placeholders
        .push(placeholder_at("companyName", 50, 50, "not-a-color"));
    let ctx = RenderContext::new().unwrap();

    let outcome = render(&ctx, &template, &customer(&[("companyName", "Acme")]))
        .await
        .unwrap();
    assert_eq!(outcome.degraded_keys(), vec!["companyName"]);
    // Default color substituted; text still present.
    assert!(has_color(&outcome.image, Rgba([0, 0, 0, 255])));
}

#[tokio::test]
async fn overlapping_placeholders_draw_later_entries_on_top() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 600, 400);
    template
        .placeholders
        .push(placeholder_at("a", 100, 100, "#ff0000").with_text("SAME"));
    template
        .placeholders
        .push(placeholder_at("b", 100, 100, "#0000ff").with_text("SAME"));
    let ctx = RenderContext::new().unwrap();

    let outcome = render(&ctx, &template, &HashMap::new()).await.unwrap();
    // Identical literal text at the same position: "b" overdraws "a"
    // completely, so only b's color survives.
    assert!(has_color(&outcome.image, Rgba([0, 0, 255, 255])));
    assert!(!has_color(&outcome.image, Rgba([255, 0, 0, 255])));
}

#[tokio::test]
async fn customer_field_case_does_not_matter() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 600, 400);
    template
        .placeholders
        .push(placeholder_at("companyName", 50, 50, "#ff0000"));
    // Token is "{companyname}"; field arrives camelCased.
    let ctx = RenderContext::new().unwrap();

    let outcome = render(&ctx, &template, &customer(&[("companyName", "Acme")]))
        .await
        .unwrap();
    assert!(has_color(&outcome.image, Rgba([255, 0, 0, 255])));
}

// ============================================================================
// FAILURE PATHS
// ============================================================================

#[tokio::test]
async fn missing_base_image_fails_whole_render() {
    let template =
        PosterTemplate::new("/nonexistent/poster.png", Dimensions::new(400, 560));
    let ctx = RenderContext::new().unwrap();

    let err = render(&ctx, &template, &HashMap::new()).await.unwrap_err();
    assert!(matches!(err, PosterError::ImageLoad { .. }));
}

#[tokio::test]
async fn stalled_host_fails_with_timeout() {
    // A listener that accepts connections but never responds.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else { break };
            tokio::spawn(async move {
                let _socket = socket;
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });

    let template = PosterTemplate::new(
        format!("http://{}/poster.png", addr),
        Dimensions::new(400, 560),
    );
    let ctx = RenderContext::new()
        .unwrap()
        .with_timeout(Duration::from_millis(200));

    let err = render(&ctx, &template, &HashMap::new()).await.unwrap_err();
    assert!(matches!(err, PosterError::ImageLoadTimeout { .. }));
}

// ============================================================================
// PREVIEW
// ============================================================================

#[tokio::test]
async fn preview_caps_width_and_keeps_aspect() {
    let dir = TempDir::new().unwrap();
    let template = template_with_base(&dir, 1200, 1680);
    let ctx = RenderContext::new().unwrap();

    let outcome = render_preview(&ctx, &template, None).await.unwrap();
    assert_eq!(outcome.image.dimensions(), (400, 560));
}

#[tokio::test]
async fn preview_draws_sample_text_scaled_down() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 800, 800);
    // Native-space placeholder near the bottom-right quadrant.
    template
        .placeholders
        .push(placeholder_at("companyName", 400, 400, "#ff0000").with_text("Sample Co"));
    let ctx = RenderContext::new().unwrap();

    let outcome = render_preview(&ctx, &template, Some(400)).await.unwrap();
    assert_eq!(outcome.image.dimensions(), (400, 400));
    // Text landed in the preview, below and right of the mapped anchor.
    let ink: Vec<(u32, u32)> = outcome
        .image
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == Rgba([255, 0, 0, 255]))
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!ink.is_empty());
    assert!(ink.iter().all(|&(x, y)| x >= 200 && y >= 200));
}

// ============================================================================
// BULK CAMPAIGNS
// ============================================================================

#[tokio::test]
async fn render_many_produces_one_poster_per_customer() {
    let dir = TempDir::new().unwrap();
    let mut template = template_with_base(&dir, 400, 300);
    template
        .placeholders
        .push(placeholder_at("companyName", 20, 20, "#ff0000"));

    let ctx = Arc::new(RenderContext::new().unwrap());
    let template = Arc::new(template);
    let customers = vec![
        customer(&[("companyName", "Acme")]),
        customer(&[("companyName", "Globex")]),
        customer(&[]),
    ];

    let results = render_many(ctx, template, customers).await;
    assert_eq!(results.len(), 3);
    for result in &results {
        let outcome = result.as_ref().expect("bulk render should succeed");
        assert_eq!(outcome.image.dimensions(), (400, 300));
    }
    // The customer with no fields gets a clean base, not a failure.
    assert!(results[2]
        .as_ref()
        .unwrap()
        .image
        .pixels()
        .all(|&p| p == BASE_COLOR));
}
