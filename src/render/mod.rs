//! # Rendering Module
//!
//! The render-time plane: turns a [`PosterTemplate`] plus a customer's
//! field values into a finished raster poster at native resolution.
//!
//! ## Modules
//!
//! - [`compositor`]: base image + resolved text → output surface
//! - [`context`]: shared HTTP client, image cache, fonts, deadline
//! - [`font`]: font resolution and glyph rasterization
//! - [`loader`]: image fetch/decode with timeout
//! - [`text`]: styled line drawing
//!
//! ## Usage Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use posterforge::geometry::Dimensions;
//! use posterforge::render::{render, RenderContext};
//! use posterforge::template::PosterTemplate;
//!
//! # async fn demo() -> Result<(), posterforge::PosterError> {
//! let ctx = RenderContext::new()?;
//! let template = PosterTemplate::new("posters/offer.png", Dimensions::new(1080, 1920));
//! let customer = HashMap::from([("companyName".to_string(), "Acme".to_string())]);
//!
//! let outcome = render(&ctx, &template, &customer).await?;
//! outcome.image.save("acme-offer.png")?;
//! # Ok(())
//! # }
//! ```

pub mod compositor;
pub mod context;
pub mod font;
pub mod loader;
pub mod text;

pub use compositor::{compose, parse_color, TEXT_INSET};
pub use context::{CachedImage, RenderContext, DEFAULT_LOAD_TIMEOUT};
pub use font::FontRegistry;

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::geometry::SpaceMap;
use crate::resolve;
use crate::template::{PosterTemplate, PREVIEW_MAX_WIDTH};

/// What went soft during an otherwise successful render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The placeholder's color did not parse; the default was substituted.
    InvalidColor,
}

/// A per-placeholder degradation attached to a successful render.
///
/// Bulk campaign runners use these to flag a specific customer's poster
/// for manual review without failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderWarning {
    /// Key of the degraded placeholder.
    pub key: String,
    pub kind: WarningKind,
    pub message: String,
}

/// A finished render: the poster surface plus any degradations.
#[derive(Debug)]
pub struct RenderOutcome {
    pub image: RgbaImage,
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutcome {
    /// Keys of placeholders that rendered with substituted defaults.
    pub fn degraded_keys(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.key.as_str()).collect()
    }
}

/// Render a populated poster for one customer.
///
/// Loads the base image (fatal on failure or deadline), substitutes the
/// customer's fields into the template's tokens, and composites at the
/// template's native dimensions. Stateless per call: safe to invoke
/// concurrently over a shared context.
pub async fn render(
    ctx: &RenderContext,
    template: &PosterTemplate,
    customer_fields: &HashMap<String, String>,
) -> Result<RenderOutcome> {
    let base = loader::load_image(ctx, &template.image_ref).await?;
    let resolved = resolve::resolve(&template.placeholders, customer_fields);
    let (image, warnings) = compose(&base, template.native_dimensions, &resolved, &ctx.fonts);
    Ok(RenderOutcome { image, warnings })
}

/// Render the design-time preview of a template.
///
/// Same compositor as [`render`], but placeholders are mapped from native
/// space down to the preview size (width capped at `max_width`, defaulting
/// to [`PREVIEW_MAX_WIDTH`]) and their literal token/sample text is drawn
/// instead of customer data.
pub async fn render_preview(
    ctx: &RenderContext,
    template: &PosterTemplate,
    max_width: Option<u32>,
) -> Result<RenderOutcome> {
    let base = loader::load_image(ctx, &template.image_ref).await?;
    let preview = template.preview_dimensions(max_width.unwrap_or(PREVIEW_MAX_WIDTH));
    let map = SpaceMap::new(template.native_dimensions, preview);

    let mapped: Vec<_> = template
        .placeholders
        .iter()
        .map(|p| p.mapped(&map))
        .collect();
    let resolved = resolve::resolve_literal(&mapped);

    let (image, warnings) = compose(&base, preview, &resolved, &ctx.fonts);
    Ok(RenderOutcome { image, warnings })
}

/// Render one template for many customers concurrently.
///
/// Spawns one task per customer over the shared context and template and
/// returns per-customer results in input order; one failed load never
/// aborts the rest of the campaign.
pub async fn render_many(
    ctx: Arc<RenderContext>,
    template: Arc<PosterTemplate>,
    customers: Vec<HashMap<String, String>>,
) -> Vec<Result<RenderOutcome>> {
    let handles: Vec<_> = customers
        .into_iter()
        .map(|fields| {
            let ctx = ctx.clone();
            let template = template.clone();
            tokio::spawn(async move { render(&ctx, &template, &fields).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(PosterError::Io(std::io::Error::other(join_err))),
        });
    }
    results
}
