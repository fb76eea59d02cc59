//! Base image loading: fetch, decode, cache, deadline.
//!
//! An image reference is either an http(s) URL or a filesystem path; the
//! resolution mechanism behind the reference is the caller's business.
//! Every failure on this path is fatal for the render — there is no
//! partial poster — and the whole fetch-and-decode runs under the
//! context's deadline so bulk campaigns never hang on one slow host.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use tracing::debug;

use crate::error::{PosterError, Result};
use crate::render::context::{CachedImage, RenderContext};

/// Load and decode the image behind `reference`, using the context's cache.
pub async fn load_image(ctx: &RenderContext, reference: &str) -> Result<Arc<DynamicImage>> {
    // Cache hit: no I/O, no deadline needed.
    {
        let mut cache = ctx.image_cache.write().await;
        if let Some(entry) = cache.get_mut(reference) {
            entry.touch();
            debug!(reference, "image cache hit");
            return Ok(entry.image.clone());
        }
    }

    let image = match tokio::time::timeout(ctx.load_timeout, fetch_and_decode(ctx, reference)).await
    {
        Ok(result) => result?,
        Err(_elapsed) => {
            return Err(PosterError::ImageLoadTimeout {
                reference: reference.to_string(),
                timeout: ctx.load_timeout,
            });
        }
    };

    let image = Arc::new(image);
    {
        let mut cache = ctx.image_cache.write().await;
        cache.insert(reference.to_string(), CachedImage::new(image.clone()));
    }
    Ok(image)
}

async fn fetch_and_decode(ctx: &RenderContext, reference: &str) -> Result<DynamicImage> {
    let bytes = if is_remote(reference) {
        fetch_remote(ctx, reference).await?
    } else {
        read_local(reference).await?
    };

    image::load_from_memory(&bytes)
        .map_err(|e| PosterError::image_load(reference, format!("failed to decode: {}", e)))
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

async fn fetch_remote(ctx: &RenderContext, reference: &str) -> Result<Vec<u8>> {
    let response = ctx
        .http_client
        .get(reference)
        .send()
        .await
        .map_err(|e| PosterError::image_load(reference, e))?;
    if !response.status().is_success() {
        return Err(PosterError::image_load(
            reference,
            format!("HTTP {}", response.status()),
        ));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| PosterError::image_load(reference, e))?;
    Ok(bytes.to_vec())
}

async fn read_local(reference: &str) -> Result<Vec<u8>> {
    let path = Path::new(reference);
    if !path.exists() {
        return Err(PosterError::image_load(reference, "file not found"));
    }
    tokio::fs::read(path)
        .await
        .map_err(|e| PosterError::image_load(reference, e))
}
