mod app_config;
mod compliance;
mod detection;
mod pipeline_result;

pub use app_config::{AppConfig, AzureOpenAiSettings, CustomVisionSettings};
pub use compliance::{
    ComplianceRecord, ComplianceVerdict, DetectionOutcome, SkipReason, SkippedDetection,
};
pub use detection::{Detection, NormalizedBox, PixelRect};
pub use pipeline_result::PipelineResult;
