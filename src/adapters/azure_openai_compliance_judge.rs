use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;

use crate::core::interfaces::adapters::ComplianceJudge;
use crate::core::models::AzureOpenAiSettings;
use crate::global_constants;

pub struct AzureOpenAiComplianceJudge {
    client: reqwest::Client,
    settings: AzureOpenAiSettings,
}

impl AzureOpenAiComplianceJudge {
    pub fn build(settings: AzureOpenAiSettings, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Azure OpenAI HTTP client")?;

        log::info!(
            "[JUDGE] Using Azure OpenAI deployment {} (api-version {})",
            settings.model,
            settings.api_version
        );
        Ok(Self { client, settings })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.settings.model),
            urlencoding::encode(&self.settings.api_version)
        )
    }

    fn build_request_body(&self, prompt: &str, image_data_url: &str) -> serde_json::Value {
        json!({
            "model": self.settings.model,
            "response_format": { "type": "json_object" },
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": image_data_url,
                                "detail": global_constants::JUDGE_IMAGE_DETAIL
                            }
                        }
                    ]
                }
            ],
            "max_tokens": self.settings.max_tokens
        })
    }

    fn extract_message_content(response_text: &str) -> Result<String> {
        let json: serde_json::Value = serde_json::from_str(response_text)
            .context("Failed to parse Azure OpenAI chat completion response")?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Chat completion response has no message content"))?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl ComplianceJudge for AzureOpenAiComplianceJudge {
    async fn judge_logo(&self, prompt: &str, image_data_url: &str) -> Result<String> {
        log::info!("[JUDGE] Requesting compliance verdict");

        let response = self
            .client
            .post(self.completions_url())
            .header(global_constants::AZURE_OPENAI_API_KEY_HEADER, &self.settings.api_key)
            .json(&self.build_request_body(prompt, image_data_url))
            .send()
            .await
            .context("Azure OpenAI chat completion request failed")?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("[JUDGE] Azure OpenAI response ({}): {}", status, response_text);

        if !status.is_success() {
            anyhow::bail!("Azure OpenAI returned {}: {}", status, response_text);
        }

        Self::extract_message_content(&response_text)
    }
}
