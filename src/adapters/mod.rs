mod azure_openai_compliance_judge;
mod custom_vision_logo_detector;

pub use azure_openai_compliance_judge::AzureOpenAiComplianceJudge;
pub use custom_vision_logo_detector::CustomVisionLogoDetector;
