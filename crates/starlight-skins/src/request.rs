//! Render requests and URL construction.
//!
//! A [`RenderRequest`] carries everything needed to ask the upstream API for
//! a skin render. [`RenderRequest::render_url`] resolves it to the canonical
//! request URL, which is also the cache key: two requests that differ only in
//! screen placement (`x`, `y`, `size`, `centered`) share one cached image.

use crate::error::{Error, Result};
use crate::types::{CropMode, RenderPose};

/// Base URL of the public Starlight Skins API.
pub const DEFAULT_BASE_URL: &str = "https://starlightskins.lunareclipse.studio";

/// Placeholder token substituted by the identifier in custom skin templates.
const USERNAME_PLACEHOLDER: &str = "{{username}}";

/// A request to render one skin.
///
/// # Example
///
/// ```
/// use starlight_skins::{CropMode, RenderPose, RenderRequest};
///
/// let request = RenderRequest::builder()
///     .identifier("CipheR_")
///     .pose(RenderPose::Marching)
///     .crop(CropMode::Full)
///     .position(100.0, 200.0)
///     .size(150.0)
///     .centered(true)
///     .build()
///     .unwrap();
///
/// assert!(request.render_url().ends_with("/render/marching/CipheR_/full"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Minecraft username, or whatever identifier the skin source expects.
    pub identifier: String,
    /// The 3D pose to render.
    pub pose: RenderPose,
    /// How much of the figure to include.
    pub crop: CropMode,
    /// Base URL of the render API.
    pub base_url: String,
    /// Optional skin source template; every `{{username}}` occurrence is
    /// replaced by the identifier.
    pub custom_skin_url: Option<String>,
    /// Screen X coordinate.
    pub x: f32,
    /// Screen Y coordinate.
    pub y: f32,
    /// Display width in pixels; the height is derived from the image's
    /// aspect ratio.
    pub size: f32,
    /// Whether (`x`, `y`) is the center of the image rather than its corner.
    pub centered: bool,
}

impl RenderRequest {
    /// Create a builder with default settings.
    #[must_use]
    pub fn builder() -> RenderRequestBuilder {
        RenderRequestBuilder::new()
    }

    /// Check pose/crop compatibility and the display size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCrop`] if the pose cannot render the
    /// requested crop, or [`Error::InvalidSize`] if `size` is not a positive
    /// finite number. No network activity happens before this check passes.
    pub fn validate(&self) -> Result<()> {
        if !self.pose.supports_crop(self.crop) {
            return Err(Error::UnsupportedCrop {
                pose: self.pose,
                crop: self.crop,
            });
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(Error::InvalidSize { size: self.size });
        }
        Ok(())
    }

    /// Resolve the canonical request URL for this request.
    ///
    /// The URL has the shape `{base}/render/{pose}/{identifier}/{crop}`,
    /// plus `?skinUrl=<resolved template>` when a custom skin source is set.
    /// The identifier and the resolved template are percent-encoded; the
    /// upstream reference interpolated them verbatim, which breaks on
    /// identifiers containing reserved characters.
    ///
    /// Pure and deterministic. The result excludes every screen-placement
    /// field, so it doubles as the cache key.
    #[must_use]
    pub fn render_url(&self) -> String {
        let mut url = format!(
            "{}/render/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.pose.as_str(),
            urlencoding::encode(&self.identifier),
            self.crop.as_str()
        );

        if let Some(template) = self.custom_skin_url.as_deref()
            && !template.is_empty()
        {
            let resolved = template.replace(USERNAME_PLACEHOLDER, &self.identifier);
            url.push_str("?skinUrl=");
            url.push_str(&urlencoding::encode(&resolved));
        }

        url
    }

    /// Top-left origin of the drawn image, given its derived height.
    ///
    /// When `centered` is set, (`x`, `y`) names the image center instead.
    #[must_use]
    pub fn origin(&self, display_height: f32) -> (f32, f32) {
        if self.centered {
            (self.x - self.size / 2.0, self.y - display_height / 2.0)
        } else {
            (self.x, self.y)
        }
    }
}

/// Fluent builder for [`RenderRequest`].
#[derive(Debug, Clone)]
pub struct RenderRequestBuilder {
    identifier: String,
    pose: RenderPose,
    crop: CropMode,
    base_url: String,
    custom_skin_url: Option<String>,
    x: f32,
    y: f32,
    size: f32,
    centered: bool,
}

impl Default for RenderRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderRequestBuilder {
    /// Create a builder with default settings: the public API base URL, the
    /// default pose, full crop, and a 64-pixel display size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identifier: String::new(),
            pose: RenderPose::Default,
            crop: CropMode::Full,
            base_url: DEFAULT_BASE_URL.to_string(),
            custom_skin_url: None,
            x: 0.0,
            y: 0.0,
            size: 64.0,
            centered: false,
        }
    }

    /// Set the username or skin-source identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Set the 3D pose.
    #[must_use]
    pub fn pose(mut self, pose: RenderPose) -> Self {
        self.pose = pose;
        self
    }

    /// Set the crop mode.
    #[must_use]
    pub fn crop(mut self, crop: CropMode) -> Self {
        self.crop = crop;
        self
    }

    /// Set the base URL of the render API.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom skin source template; `{{username}}` is replaced by the
    /// identifier when the URL is built.
    #[must_use]
    pub fn custom_skin_url(mut self, template: impl Into<String>) -> Self {
        self.custom_skin_url = Some(template.into());
        self
    }

    /// Set the screen position.
    #[must_use]
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the display width in pixels.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Center the image on the configured position.
    #[must_use]
    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Validate the configuration and produce the request.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RenderRequest::validate`].
    pub fn build(self) -> Result<RenderRequest> {
        let request = RenderRequest {
            identifier: self.identifier,
            pose: self.pose,
            crop: self.crop,
            base_url: self.base_url,
            custom_skin_url: self.custom_skin_url,
            x: self.x,
            y: self.y,
            size: self.size,
            centered: self.centered,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(identifier: &str, pose: RenderPose, crop: CropMode) -> RenderRequest {
        RenderRequest::builder()
            .identifier(identifier)
            .pose(pose)
            .crop(crop)
            .base_url("https://api.example")
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_url_shape() {
        let req = request("Alice", RenderPose::Head, CropMode::Full);
        assert_eq!(req.render_url(), "https://api.example/render/head/Alice/full");
    }

    #[test]
    fn test_head_rejects_bust() {
        let result = RenderRequest::builder()
            .identifier("Alice")
            .pose(RenderPose::Head)
            .crop(CropMode::Bust)
            .build();
        assert_eq!(
            result,
            Err(Error::UnsupportedCrop {
                pose: RenderPose::Head,
                crop: CropMode::Bust,
            })
        );
    }

    #[test]
    fn test_restricted_poses_reject_face() {
        for pose in [RenderPose::Mojavatar, RenderPose::Sleeping] {
            let result = RenderRequest::builder()
                .identifier("Alice")
                .pose(pose)
                .crop(CropMode::Face)
                .build();
            assert!(matches!(result, Err(Error::UnsupportedCrop { .. })), "pose {pose:?}");
        }
    }

    #[test]
    fn test_custom_skin_url_substitution() {
        let req = RenderRequest::builder()
            .identifier("Bob")
            .pose(RenderPose::Default)
            .crop(CropMode::Full)
            .base_url("https://api.example")
            .custom_skin_url("https://skins.example/{{username}}.png")
            .build()
            .unwrap();

        // The resolved template is percent-encoded as a query component.
        assert_eq!(
            req.render_url(),
            "https://api.example/render/default/Bob/full\
             ?skinUrl=https%3A%2F%2Fskins.example%2FBob.png"
        );
    }

    #[test]
    fn test_empty_custom_skin_url_is_ignored() {
        let req = RenderRequest::builder()
            .identifier("Bob")
            .base_url("https://api.example")
            .custom_skin_url("")
            .build()
            .unwrap();
        assert_eq!(req.render_url(), "https://api.example/render/default/Bob/full");
    }

    #[test]
    fn test_identifier_is_percent_encoded() {
        let req = request("two words/..", RenderPose::Default, CropMode::Full);
        assert_eq!(
            req.render_url(),
            "https://api.example/render/default/two%20words%2F../full"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let req = RenderRequest::builder()
            .identifier("Alice")
            .pose(RenderPose::Head)
            .base_url("https://api.example/")
            .build()
            .unwrap();
        assert_eq!(req.render_url(), "https://api.example/render/head/Alice/full");
    }

    #[test]
    fn test_non_positive_size_rejected() {
        for size in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let result = RenderRequest::builder()
                .identifier("Alice")
                .size(size)
                .build();
            assert!(matches!(result, Err(Error::InvalidSize { .. })), "size {size}");
        }
    }

    #[test]
    fn test_origin_centered() {
        let mut req = request("Alice", RenderPose::Default, CropMode::Full);
        req.x = 100.0;
        req.y = 200.0;
        req.size = 64.0;
        assert_eq!(req.origin(128.0), (100.0, 200.0));

        req.centered = true;
        assert_eq!(req.origin(128.0), (68.0, 136.0));
    }

    proptest! {
        /// Building the URL twice from equal inputs yields an identical string.
        #[test]
        fn prop_render_url_deterministic(
            identifier in ".{0,32}",
            pose_index in 0usize..RenderPose::ALL.len(),
            template in proptest::option::of(".{0,32}"),
        ) {
            let pose = RenderPose::ALL[pose_index];
            let req = RenderRequest {
                identifier,
                pose,
                // Full is valid for every pose.
                crop: CropMode::Full,
                base_url: "https://api.example".to_string(),
                custom_skin_url: template,
                x: 0.0,
                y: 0.0,
                size: 64.0,
                centered: false,
            };
            let first = req.render_url();
            let second = req.render_url();
            prop_assert_eq!(&first, &second);
            // Placement fields never influence the cache key.
            let mut moved = req.clone();
            moved.x = 10.0;
            moved.y = -4.0;
            moved.size = 256.0;
            moved.centered = true;
            prop_assert_eq!(req.render_url(), moved.render_url());
        }
    }
}
