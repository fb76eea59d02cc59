//! Render context — shared resources available to every render call.
//!
//! Constructed once (per server lifetime or per bulk campaign) and shared
//! across concurrent renders. Each render allocates its own output surface;
//! the context only carries read-mostly infrastructure: the HTTP client,
//! the decoded-image cache, the font registry, and the load deadline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use image::DynamicImage;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::render::font::FontRegistry;

/// Deadline for loading and decoding a base image.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// A decoded base image held in the shared cache.
///
/// Caching is a pure optimization: decoded bytes for a given reference are
/// deterministic, so a hit never changes observable output.
#[derive(Clone)]
pub struct CachedImage {
    pub image: Arc<DynamicImage>,
    pub last_used: Instant,
}

impl CachedImage {
    pub fn new(image: Arc<DynamicImage>) -> Self {
        Self {
            image,
            last_used: Instant::now(),
        }
    }

    /// Mark the entry as recently used.
    pub fn touch(&mut self) {
        self.last_used = Instant::now();
    }
}

/// Shared resources for rendering.
#[derive(Clone)]
pub struct RenderContext {
    /// HTTP client for downloading remote base images.
    pub http_client: reqwest::Client,
    /// Decoded base images keyed by image reference.
    pub image_cache: Arc<RwLock<HashMap<String, CachedImage>>>,
    /// Runtime-registered fonts; empty means bitmap-only rendering.
    pub fonts: FontRegistry,
    /// Per-image load deadline.
    pub load_timeout: Duration,
}

impl RenderContext {
    /// Create a context with a fresh client, empty cache, and the default
    /// 10 second load deadline.
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("posterforge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http_client,
            image_cache: Arc::new(RwLock::new(HashMap::new())),
            fonts: FontRegistry::new(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        })
    }

    /// Same context with a different load deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Same context with a font registry installed.
    pub fn with_fonts(mut self, fonts: FontRegistry) -> Self {
        self.fonts = fonts;
        self
    }
}
