use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::core::interfaces::adapters::LogoDetector;
use crate::core::models::{CustomVisionSettings, Detection, NormalizedBox};
use crate::global_constants;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    tag_name: String,
    probability: f64,
    bounding_box: Option<PredictionBox>,
}

#[derive(Deserialize)]
struct PredictionBox {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

pub struct CustomVisionLogoDetector {
    client: reqwest::Client,
    settings: CustomVisionSettings,
}

impl CustomVisionLogoDetector {
    pub fn build(settings: CustomVisionSettings, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Custom Vision HTTP client")?;

        log::info!(
            "[DETECTOR] Using Custom Vision project {} iteration {}",
            settings.project_id,
            settings.model_name
        );
        Ok(Self { client, settings })
    }

    fn prediction_url(&self) -> String {
        format!(
            "{}/customvision/v3.0/Prediction/{}/detect/iterations/{}/image",
            self.settings.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.settings.project_id),
            urlencoding::encode(&self.settings.model_name)
        )
    }

    fn parse_predictions(response_text: &str) -> Result<Vec<Detection>> {
        let response: PredictionResponse = serde_json::from_str(response_text)
            .context("Failed to parse Custom Vision prediction response")?;

        let detections = response
            .predictions
            .into_iter()
            .filter_map(|prediction| match prediction.bounding_box {
                Some(region) => Some(Detection::new(
                    prediction.tag_name,
                    prediction.probability,
                    NormalizedBox::new(region.left, region.top, region.width, region.height),
                )),
                None => {
                    log::warn!(
                        "[DETECTOR] Ignoring prediction '{}' without a bounding box",
                        prediction.tag_name
                    );
                    None
                }
            })
            .collect();

        Ok(detections)
    }
}

#[async_trait]
impl LogoDetector for CustomVisionLogoDetector {
    async fn detect_logos(&self, image_bytes: &[u8]) -> Result<Vec<Detection>> {
        log::info!("[DETECTOR] Sending {} image bytes for detection", image_bytes.len());

        let response = self
            .client
            .post(self.prediction_url())
            .header(
                global_constants::CUSTOM_VISION_PREDICTION_KEY_HEADER,
                &self.settings.prediction_key,
            )
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image_bytes.to_vec())
            .send()
            .await
            .context("Custom Vision prediction request failed")?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("[DETECTOR] Custom Vision response ({}): {}", status, response_text);

        if !status.is_success() {
            anyhow::bail!(
                "Custom Vision prediction returned {}: {}",
                status,
                response_text
            );
        }

        let detections = Self::parse_predictions(&response_text)?;
        log::info!("[DETECTOR] Received {} predictions", detections.len());
        Ok(detections)
    }
}
