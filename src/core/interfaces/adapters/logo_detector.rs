use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::Detection;

#[async_trait]
pub trait LogoDetector: Send + Sync {
    // Unfiltered, in service order.
    async fn detect_logos(&self, image_bytes: &[u8]) -> Result<Vec<Detection>>;
}
