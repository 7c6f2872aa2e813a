pub const APPLICATION_NAME: &str = "Logo Compliance Checker";

pub const PREDICTION_THRESHOLD: f64 = 0.4;

pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

pub const ENV_CUSTOM_VISION_ENDPOINT: &str = "CUSTOM_VISION_ENDPOINT";
pub const ENV_CUSTOM_VISION_PREDICTION_KEY: &str = "CUSTOM_VISION_PREDICTION_KEY";
pub const ENV_CUSTOM_VISION_PROJECT_ID: &str = "CUSTOM_VISION_PROJECT_ID";
pub const ENV_CUSTOM_VISION_MODEL_NAME: &str = "CUSTOM_VISION_MODEL_NAME";
pub const ENV_AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_AZURE_OPENAI_MODEL: &str = "AZURE_OPENAI_MODEL";
pub const ENV_AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_REQUIREMENTS_PATH: &str = "LOGO_REQUIREMENTS_PATH";
pub const ENV_FONT_PATH: &str = "LOGO_COMPLIANCE_FONT_PATH";
pub const ENV_MAX_TOKENS: &str = "LOGO_COMPLIANCE_MAX_TOKENS";
pub const ENV_JUDGE_CONCURRENCY: &str = "LOGO_COMPLIANCE_JUDGE_CONCURRENCY";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "LOGO_COMPLIANCE_HTTP_TIMEOUT_SECS";

pub const DEFAULT_AZURE_OPENAI_API_VERSION: &str = "2024-02-01";
pub const DEFAULT_REQUIREMENTS_PATH: &str = "logo_requirements.json";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_JUDGE_CONCURRENCY: usize = 1;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

pub const CUSTOM_VISION_PREDICTION_KEY_HEADER: &str = "Prediction-Key";
pub const AZURE_OPENAI_API_KEY_HEADER: &str = "api-key";
pub const JUDGE_IMAGE_DETAIL: &str = "high";

pub const ANNOTATION_BOX_RGB: [u8; 3] = [0, 128, 0];
pub const ANNOTATION_BORDER_WIDTH: u32 = 2;
pub const ANNOTATION_FONT_SIZE: f32 = 16.0;
pub const ANNOTATION_LABEL_GAP: i32 = 10;

pub const ANNOTATED_IMAGE_FILE_NAME: &str = "annotated.png";
pub const REPORT_FILE_NAME: &str = "compliance_report.md";
pub const REPORT_HEADERS: [&str; 2] = ["Extracted Logo", "Compliance"];

pub const USAGE: &str = "usage: logo-compliance-checker <image> [output_dir]";
