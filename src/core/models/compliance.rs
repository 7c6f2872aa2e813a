use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceVerdict {
    pub compliant: bool,
    pub explanation: String,
    pub questions: String,
    pub logo_name: String,
}

#[derive(Deserialize)]
struct JudgeVerdictPayload {
    compliant: bool,
    explanation: String,
    #[serde(deserialize_with = "questions_as_text")]
    questions: String,
}

// Judges occasionally answer the per-question breakdown as an object or list
// rather than prose; keep it, as compact JSON text.
fn questions_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Null => Err(serde::de::Error::custom(
            "questions must not be null",
        )),
        other => Ok(other.to_string()),
    }
}

impl ComplianceVerdict {
    pub fn parse(response_text: &str, logo_name: &str) -> Result<Self, serde_json::Error> {
        let payload: JudgeVerdictPayload = serde_json::from_str(response_text.trim())?;

        Ok(Self {
            compliant: payload.compliant,
            explanation: payload.explanation,
            questions: payload.questions,
            logo_name: logo_name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceRecord {
    pub crop_markdown: String,
    pub verdict_json: String,
}

impl ComplianceRecord {
    pub fn build(crop_data_url: &str, verdict: &ComplianceVerdict) -> Result<Self, serde_json::Error> {
        Ok(Self {
            crop_markdown: format!("![]({})", crop_data_url),
            verdict_json: serde_json::to_string(verdict)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("no compliance requirements registered for logo '{label}'")]
    MissingRequirements { label: String },

    #[error("failed to prepare logo crop: {0}")]
    CropEncoding(String),

    #[error("compliance judge request failed: {0}")]
    JudgeUnavailable(String),

    #[error("judge response is not a valid verdict: {0}")]
    MalformedVerdict(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDetection {
    pub label: String,
    pub confidence: f64,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    Judged(ComplianceRecord),
    Skipped(SkippedDetection),
}
