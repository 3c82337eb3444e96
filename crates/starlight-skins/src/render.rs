//! Render orchestration and the renderer seam.
//!
//! The crate never draws anything itself: the host supplies a
//! [`SkinRenderer`] (typically binding a texture and drawing a quad) and
//! [`render_skin`] composes validation, cache lookup, fetch, and the draw
//! call in that order.

use crate::cache::CachedSkin;
use crate::client::SkinClient;
use crate::error::Result;
use crate::request::RenderRequest;

/// Drawing collaborator supplied by the host application.
pub trait SkinRenderer {
    /// Draw a decoded skin at the given screen rectangle.
    ///
    /// `x` and `y` are the top-left corner; centering has already been
    /// applied by the caller.
    fn draw(&mut self, skin: &CachedSkin, width: f32, height: f32, x: f32, y: f32);
}

/// Resolve a request and hand the result to the renderer.
///
/// On any failure the renderer is not invoked and the error is returned to
/// the caller; nothing is logged-and-swallowed.
///
/// # Errors
///
/// Propagates every [`SkinClient::resolve`] failure mode.
pub async fn render_skin<R: SkinRenderer>(
    client: &SkinClient,
    request: &RenderRequest,
    renderer: &mut R,
) -> Result<()> {
    let skin = client.resolve(request).await?;
    let (x, y) = request.origin(skin.display_height);
    renderer.draw(&skin, request.size, skin.display_height, x, y);
    Ok(())
}
