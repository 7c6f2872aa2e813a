use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ComplianceJudge: Send + Sync {
    async fn judge_logo(&self, prompt: &str, image_data_url: &str) -> Result<String>;
}
