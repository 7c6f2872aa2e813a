use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use image::DynamicImage;

use crate::core::compliance::{build_compliance_prompt, RequirementsStore};
use crate::core::imaging::{crop_region, encode_data_url, encode_jpeg_bytes, DetectionAnnotator};
use crate::core::interfaces::adapters::{ComplianceJudge, LogoDetector};
use crate::core::models::{
    ComplianceRecord, ComplianceVerdict, Detection, DetectionOutcome, PipelineResult, SkipReason,
    SkippedDetection,
};
use crate::global_constants;

// Detector failures abort the run. A failure while judging one detection only
// drops that detection into `PipelineResult::skipped`.
pub struct ComplianceOrchestrator {
    logo_detector: Arc<dyn LogoDetector>,
    compliance_judge: Arc<dyn ComplianceJudge>,
    requirements_store: Arc<RequirementsStore>,
    annotator: Arc<DetectionAnnotator>,
    judge_concurrency: usize,
}

impl ComplianceOrchestrator {
    pub fn build(
        logo_detector: Arc<dyn LogoDetector>,
        compliance_judge: Arc<dyn ComplianceJudge>,
        requirements_store: Arc<RequirementsStore>,
        annotator: Arc<DetectionAnnotator>,
    ) -> Self {
        Self {
            logo_detector,
            compliance_judge,
            requirements_store,
            annotator,
            judge_concurrency: global_constants::DEFAULT_JUDGE_CONCURRENCY,
        }
    }

    pub fn with_judge_concurrency(mut self, judge_concurrency: usize) -> Self {
        self.judge_concurrency = judge_concurrency.max(1);
        self
    }

    pub async fn run(&self, image: &DynamicImage) -> Result<PipelineResult> {
        log::info!(
            "[ORCHESTRATOR] Starting compliance run on {}x{} image",
            image.width(),
            image.height()
        );

        let image_bytes =
            encode_jpeg_bytes(image).context("Failed to prepare image for logo detection")?;
        let detections = self
            .logo_detector
            .detect_logos(&image_bytes)
            .await
            .context("Logo detection failed")?;

        log::info!("[ORCHESTRATOR] Detector returned {} predictions", detections.len());

        let annotated_image =
            self.annotator
                .annotate(image, &detections, global_constants::PREDICTION_THRESHOLD);

        let confident: Vec<&Detection> = detections
            .iter()
            .filter(|detection| detection.exceeds_threshold(global_constants::PREDICTION_THRESHOLD))
            .collect();

        log::info!(
            "[ORCHESTRATOR] Judging {} detections above threshold {}",
            confident.len(),
            global_constants::PREDICTION_THRESHOLD
        );

        let outcomes: Vec<DetectionOutcome> = stream::iter(
            confident
                .into_iter()
                .map(|detection| self.evaluate_detection(image, detection)),
        )
        .buffered(self.judge_concurrency)
        .collect()
        .await;

        let result = PipelineResult::assemble(annotated_image, outcomes);

        for skipped in &result.skipped {
            log::warn!(
                "[ORCHESTRATOR] Skipped '{}' ({:.2}): {}",
                skipped.label,
                skipped.confidence,
                skipped.reason
            );
        }
        log::info!(
            "[ORCHESTRATOR] Run complete: {} judged, {} skipped",
            result.records.len(),
            result.skipped.len()
        );

        Ok(result)
    }

    async fn evaluate_detection(&self, image: &DynamicImage, detection: &Detection) -> DetectionOutcome {
        match self.judge_detection(image, detection).await {
            Ok(record) => DetectionOutcome::Judged(record),
            Err(reason) => DetectionOutcome::Skipped(SkippedDetection {
                label: detection.label.clone(),
                confidence: detection.confidence,
                reason,
            }),
        }
    }

    async fn judge_detection(
        &self,
        image: &DynamicImage,
        detection: &Detection,
    ) -> Result<ComplianceRecord, SkipReason> {
        let crop = crop_region(image, &detection.bounding_box)
            .map_err(|error| SkipReason::CropEncoding(format!("{:#}", error)))?;
        let crop_data_url = encode_data_url(&crop)
            .map_err(|error| SkipReason::CropEncoding(format!("{:#}", error)))?;

        let questions = self
            .requirements_store
            .lookup(&detection.label)
            .map_err(|error| SkipReason::MissingRequirements { label: error.label })?;
        let prompt = build_compliance_prompt(questions);

        log::debug!(
            "[ORCHESTRATOR] Asking judge about '{}' with {} questions",
            detection.label,
            questions.len()
        );

        let response_text = self
            .compliance_judge
            .judge_logo(&prompt, &crop_data_url)
            .await
            .map_err(|error| SkipReason::JudgeUnavailable(format!("{:#}", error)))?;

        let verdict = ComplianceVerdict::parse(&response_text, &detection.label)
            .map_err(|error| SkipReason::MalformedVerdict(error.to_string()))?;

        log::info!(
            "[ORCHESTRATOR] '{}' judged {}",
            detection.label,
            if verdict.compliant { "compliant" } else { "not compliant" }
        );

        ComplianceRecord::build(&crop_data_url, &verdict)
            .map_err(|error| SkipReason::MalformedVerdict(error.to_string()))
    }
}
