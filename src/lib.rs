//! # Posterforge - Poster Placeholder Compositor
//!
//! Posterforge renders personalized marketing posters: a stored template
//! (base image + named, positioned text placeholders) plus one customer's
//! field values produce a finished raster at the template's native
//! resolution. It provides:
//!
//! - **Coordinate mapping**: preview-space ↔ native-space conversion for
//!   the drag/drop editor
//! - **Placeholder model**: positioned, styled text slots with
//!   non-mutating updates
//! - **Token resolution**: `{companyname}`-style substitution against a
//!   customer field map
//! - **Raster composition**: deterministic text burn-in shared by the
//!   editor preview and the final render
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::collections::HashMap;
//! use posterforge::geometry::{Dimensions, Point};
//! use posterforge::render::{render, RenderContext};
//! use posterforge::template::{Placeholder, PosterTemplate};
//!
//! # async fn demo() -> Result<(), posterforge::PosterError> {
//! // A template as persisted by the editor (native coordinates).
//! let mut template =
//!     PosterTemplate::new("https://cdn.example.com/offer.png", Dimensions::new(1080, 1920));
//! template.placeholders.push(Placeholder::new(
//!     "companyName",
//!     Point::new(120, 1500),
//!     Dimensions::new(600, 90),
//! ));
//!
//! // One customer's data; missing fields render as empty, never fail.
//! let customer = HashMap::from([("companyName".to_string(), "Acme Traders".to_string())]);
//!
//! let ctx = RenderContext::new()?;
//! let outcome = render(&ctx, &template, &customer).await?;
//! outcome.image.save("acme.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Poster templates, placeholders, text styles |
//! | [`geometry`] | Coordinate spaces and the preview↔native mapper |
//! | [`resolve`] | Token substitution against customer fields |
//! | [`render`] | Image loading, fonts, and raster composition |
//! | [`error`] | Error types |
//!
//! ## Failure model
//!
//! A render either fails whole (base image unreachable, undecodable, or
//! past the deadline — no partial output) or succeeds with a list of
//! per-placeholder warnings for locally recovered problems such as an
//! unparseable color. Unresolvable tokens are not a problem at all: they
//! render as empty by design.

pub mod error;
pub mod geometry;
pub mod render;
pub mod resolve;
pub mod template;

// Re-exports for convenience
pub use error::PosterError;
pub use render::{render, render_many, render_preview, RenderContext, RenderOutcome};
pub use template::{Placeholder, PosterTemplate};
