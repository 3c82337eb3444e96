//! Async client for rendering Minecraft player skins via the Starlight
//! Skins API.
//!
//! This crate fetches pre-rendered skin images from the upstream render
//! endpoint, decodes them, and keeps them in a thread-safe, TTL-bounded
//! in-memory cache keyed by the resolved request URL. Drawing stays with
//! the host: it implements [`SkinRenderer`] and receives the decoded image
//! with its derived screen metrics.
//!
//! # Design principles
//!
//! - **Explicit lifecycle**: the cache and client are plain objects owned by
//!   the host, not process-wide statics
//! - **Typed failures**: every error reaches the caller as a [`Error`]
//!   variant; nothing is logged and swallowed
//! - **Single-flight fetches**: concurrent requests for one URL share one
//!   download
//!
//! # Example
//!
//! ```ignore
//! use starlight_skins::{CropMode, RenderPose, RenderRequest, SkinClient};
//!
//! let client = SkinClient::new();
//!
//! let request = RenderRequest::builder()
//!     .identifier("CipheR_")
//!     .pose(RenderPose::Marching)
//!     .crop(CropMode::Full)
//!     .position(100.0, 200.0)
//!     .size(150.0)
//!     .centered(true)
//!     .build()?;
//!
//! let skin = client.resolve(&request).await?;
//! ```

pub mod cache;
mod client;
mod error;
mod render;
mod request;
pub mod types;

#[cfg(test)]
mod testutil;

pub use cache::{CachedSkin, DEFAULT_TTL, SkinCache};
pub use client::SkinClient;
pub use error::{Error, Result};
pub use render::{SkinRenderer, render_skin};
pub use request::{DEFAULT_BASE_URL, RenderRequest, RenderRequestBuilder};
pub use types::{CropMode, RenderPose};
