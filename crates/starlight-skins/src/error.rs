//! Error types for the starlight-skins crate.

use std::fmt;

use crate::types::{CropMode, RenderPose};

/// Result type for starlight-skins operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, fetching, or decoding a skin render.
///
/// All errors are terminal for the render attempt that produced them: the
/// crate performs no retries, and a failed fetch leaves the cache unchanged.
/// The enum is `Clone` so a result can be handed to every caller awaiting a
/// shared in-flight fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested crop mode is not supported by the requested pose.
    UnsupportedCrop {
        /// The pose that was requested.
        pose: RenderPose,
        /// The crop mode the pose cannot render.
        crop: CropMode,
    },
    /// The requested display size is not a positive finite number.
    InvalidSize {
        /// The rejected size.
        size: f32,
    },
    /// HTTP request failed (transport error or timeout).
    Http {
        /// The URL that failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// HTTP response had a non-success status code.
    HttpStatus {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The response body could not be decoded as an image.
    Decode {
        /// The URL whose body failed to decode.
        url: String,
        /// The error message.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedCrop { pose, crop } => {
                write!(f, "crop mode {crop:?} is not supported by pose {pose:?}")
            }
            Error::InvalidSize { size } => {
                write!(f, "display size must be positive and finite, got {size}")
            }
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::HttpStatus { url, status } => {
                write!(f, "http request to {url} returned status {status}")
            }
            Error::Decode { url, message } => {
                write!(f, "failed to decode image from {url}: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}
