//! # Error Types
//!
//! This module defines error types used throughout the posterforge library.
//!
//! Fatal errors abort a render with no partial output. Per-placeholder
//! problems (a bad color, for instance) are *not* errors: the compositor
//! recovers locally and reports them as
//! [`RenderWarning`](crate::render::RenderWarning) entries on the
//! successful result.

use std::time::Duration;
use thiserror::Error;

/// Main error type for posterforge operations.
#[derive(Debug, Error)]
pub enum PosterError {
    /// Base image unreachable or undecodable. Fatal for the render.
    #[error("failed to load image '{reference}': {reason}")]
    ImageLoad { reference: String, reason: String },

    /// Base image load exceeded the deadline. Fatal, but distinguishable
    /// from [`PosterError::ImageLoad`] so callers can retry with backoff.
    #[error("timed out loading image '{reference}' after {timeout:?}")]
    ImageLoadTimeout { reference: String, timeout: Duration },

    /// A style patch contained a key the renderer does not understand.
    /// Programmer error at the call site; never reaches render.
    #[error("invalid style key: {0}")]
    InvalidStyleKey(String),

    /// A style patch contained a value of the wrong shape for a known key.
    #[error("invalid style value for '{key}': {reason}")]
    InvalidStyleValue { key: String, reason: String },

    /// Network error outside an image fetch (e.g. HTTP client setup).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Registered font data could not be parsed.
    #[error("font error: {0}")]
    Font(String),

    /// Image processing error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Serialization error (template/customer JSON)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PosterError {
    /// Build an [`PosterError::ImageLoad`] from any displayable cause.
    pub fn image_load(reference: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        PosterError::ImageLoad {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PosterError>;
