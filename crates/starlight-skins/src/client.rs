//! HTTP client for fetching and decoding skin renders.
//!
//! [`SkinClient`] resolves a [`RenderRequest`] to a [`CachedSkin`]: it checks
//! the cache first, and on a miss downloads the render from the upstream API,
//! decodes it, derives the display height, and stores the result.
//!
//! Fetches are asynchronous and single-flight: concurrent requests for the
//! same URL share one underlying download instead of racing each other onto
//! the network.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use futures_util::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use image::RgbaImage;

use crate::cache::{CachedSkin, SkinCache};
use crate::error::{Error, Result};
use crate::request::RenderRequest;

/// Connect and total request timeout, matching the upstream reference.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// An in-progress fetch that any number of callers can await.
type SkinFlight = Shared<BoxFuture<'static, Result<CachedSkin>>>;

/// Client for fetching, decoding, and caching skin renders.
///
/// Wrap it in an [`Arc`] to share it between the render loop and any
/// background tasks; the cache inside is already shared and thread-safe.
///
/// # Example
///
/// ```no_run
/// use starlight_skins::{RenderRequest, SkinClient};
///
/// # async fn example() -> starlight_skins::Result<()> {
/// let client = SkinClient::new();
/// let request = RenderRequest::builder().identifier("CipheR_").build()?;
/// let skin = client.resolve(&request).await?;
/// println!("{}x{}", skin.image.width(), skin.image.height());
/// # Ok(())
/// # }
/// ```
pub struct SkinClient {
    http: reqwest::Client,
    cache: SkinCache,
    in_flight: Arc<Mutex<HashMap<String, SkinFlight>>>,
}

impl SkinClient {
    /// Create a client with default timeouts and a fresh cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_http_and_cache(default_http(), SkinCache::new())
    }

    /// Create a client with a custom cache.
    #[must_use]
    pub fn with_cache(cache: SkinCache) -> Self {
        Self::with_http_and_cache(default_http(), cache)
    }

    /// Create a client with a custom HTTP client.
    ///
    /// The caller is responsible for configuring timeouts on it.
    #[must_use]
    pub fn with_http(http: reqwest::Client) -> Self {
        Self::with_http_and_cache(http, SkinCache::new())
    }

    /// Create a client with a custom HTTP client and cache.
    #[must_use]
    pub fn with_http_and_cache(http: reqwest::Client, cache: SkinCache) -> Self {
        Self {
            http,
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The cache backing this client.
    #[must_use]
    pub fn cache(&self) -> &SkinCache {
        &self.cache
    }

    /// Resolve a request to a decoded skin, fetching on a cache miss.
    ///
    /// The request is validated before any network activity. On a miss the
    /// caller either starts the fetch or awaits one already in flight for
    /// the same URL. A failed fetch leaves the cache unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCrop`] or [`Error::InvalidSize`] for an
    /// invalid request, and [`Error::Http`], [`Error::HttpStatus`], or
    /// [`Error::Decode`] when the fetch fails.
    pub async fn resolve(&self, request: &RenderRequest) -> Result<CachedSkin> {
        request.validate()?;
        let url = request.render_url();

        if let Some(entry) = self.cache.lookup(&url) {
            tracing::debug!(url, "cache hit");
            return Ok(entry);
        }

        self.join_flight(&url, request.size).await
    }

    /// Join the in-flight fetch for `url`, starting one if none exists.
    ///
    /// The flight retires itself from the table as its last step, so a
    /// completed flight is removed no matter which caller drives it to
    /// completion — callers that started a fetch may be cancelled before it
    /// finishes, and whoever awaits the shared future last must not leave a
    /// finished flight behind to be replayed after the cache entry expires.
    fn join_flight(&self, url: &str, display_size: f32) -> SkinFlight {
        let mut in_flight = self.in_flight.lock().unwrap();

        if let Some(flight) = in_flight.get(url) {
            tracing::debug!(url, "joining in-flight fetch");
            return flight.clone();
        }

        let http = self.http.clone();
        let cache = self.cache.clone();
        let table = Arc::clone(&self.in_flight);
        let owned = url.to_string();
        let flight = async move {
            let result = match fetch_and_decode(&http, &owned, display_size).await {
                Ok((image, display_height)) => Ok(cache.store(&owned, image, display_height)),
                Err(e) => Err(e),
            };
            // The table still maps `owned` to this very flight (nothing else
            // can insert while it is present), so this removes exactly us.
            table.lock().unwrap().remove(&owned);
            result
        }
        .boxed()
        .shared();

        in_flight.insert(url.to_string(), flight.clone());
        flight
    }
}

impl Default for SkinClient {
    fn default() -> Self {
        Self::new()
    }
}

fn default_http() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(FETCH_TIMEOUT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("default reqwest client should build")
}

/// Fetch a render and decode it, deriving the display height from the
/// requested width and the image's aspect ratio.
async fn fetch_and_decode(
    http: &reqwest::Client,
    url: &str,
    display_size: f32,
) -> Result<(Arc<RgbaImage>, f32)> {
    tracing::debug!(url, "fetching skin");

    let response = http.get(url).send().await.map_err(|e| Error::Http {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| Error::Http {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let image = image::load_from_memory(&body)
        .map_err(|e| Error::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?
        .into_rgba8();

    #[allow(clippy::cast_precision_loss)]
    let ratio = image.height() as f32 / image.width() as f32;

    Ok((Arc::new(image), display_size * ratio))
}
