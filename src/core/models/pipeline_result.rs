use image::DynamicImage;

use super::{ComplianceRecord, DetectionOutcome, SkippedDetection};

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub annotated_image: DynamicImage,
    pub records: Vec<ComplianceRecord>,
    pub skipped: Vec<SkippedDetection>,
}

impl PipelineResult {
    pub fn assemble(annotated_image: DynamicImage, outcomes: Vec<DetectionOutcome>) -> Self {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for outcome in outcomes {
            match outcome {
                DetectionOutcome::Judged(record) => records.push(record),
                DetectionOutcome::Skipped(skip) => skipped.push(skip),
            }
        }

        Self {
            annotated_image,
            records,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SkipReason;

    fn record(name: &str) -> ComplianceRecord {
        ComplianceRecord {
            crop_markdown: format!("![]({})", name),
            verdict_json: format!(r#"{{"logo_name":"{}"}}"#, name),
        }
    }

    #[test]
    fn test_assemble_splits_outcomes_preserving_order() {
        let outcomes = vec![
            DetectionOutcome::Judged(record("first")),
            DetectionOutcome::Skipped(SkippedDetection {
                label: "unknown".to_string(),
                confidence: 0.9,
                reason: SkipReason::MissingRequirements {
                    label: "unknown".to_string(),
                },
            }),
            DetectionOutcome::Judged(record("second")),
        ];

        let result = PipelineResult::assemble(DynamicImage::new_rgb8(4, 4), outcomes);

        assert_eq!(result.records, vec![record("first"), record("second")]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].label, "unknown");
        assert_eq!(result.annotated_image.width(), 4);
    }
}
