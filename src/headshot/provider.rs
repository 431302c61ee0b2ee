//! Generation provider trait.

use crate::error::Result;
use crate::headshot::types::{GeneratedHeadshot, HeadshotStyle, UploadedImage};
use async_trait::async_trait;

/// A request to generate a professional headshot from an uploaded photo.
#[derive(Debug, Clone)]
pub struct HeadshotRequest {
    /// The encoded portrait photo.
    pub image: UploadedImage,
    /// The selected headshot style.
    pub style: HeadshotStyle,
}

impl HeadshotRequest {
    /// Creates a new request.
    pub fn new(image: UploadedImage, style: HeadshotStyle) -> Self {
        Self { image, style }
    }
}

/// Trait for headshot generation providers.
///
/// This is the system's single integration point with the external
/// generative-image service. A call is one suspend point with no partial
/// results and no internal retry; re-invocation on failure is up to the
/// caller. Test code substitutes stub implementations.
#[async_trait]
pub trait HeadshotProvider: Send + Sync {
    /// Generates a headshot from the given request.
    async fn generate(&self, request: &HeadshotRequest) -> Result<GeneratedHeadshot>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}
