use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::global_constants;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomVisionSettings {
    pub endpoint: String,
    pub prediction_key: String,
    pub project_id: String,
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AzureOpenAiSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub api_version: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub custom_vision: CustomVisionSettings,
    pub azure_openai: AzureOpenAiSettings,
    pub requirements_path: PathBuf,
    pub font_path: Option<PathBuf>,
    pub judge_concurrency: usize,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Every missing required key is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut missing_keys = Vec::new();
        let mut require = |key: &'static str| match read(key) {
            Some(value) => value,
            None => {
                missing_keys.push(key);
                String::new()
            }
        };

        let custom_vision = CustomVisionSettings {
            endpoint: require(global_constants::ENV_CUSTOM_VISION_ENDPOINT),
            prediction_key: require(global_constants::ENV_CUSTOM_VISION_PREDICTION_KEY),
            project_id: require(global_constants::ENV_CUSTOM_VISION_PROJECT_ID),
            model_name: require(global_constants::ENV_CUSTOM_VISION_MODEL_NAME),
        };
        let openai_endpoint = require(global_constants::ENV_AZURE_OPENAI_ENDPOINT);
        let openai_api_key = require(global_constants::ENV_AZURE_OPENAI_API_KEY);
        let openai_model = require(global_constants::ENV_AZURE_OPENAI_MODEL);

        if !missing_keys.is_empty() {
            bail!(
                "missing required environment variables: {}",
                missing_keys.join(", ")
            );
        }

        let azure_openai = AzureOpenAiSettings {
            endpoint: openai_endpoint,
            api_key: openai_api_key,
            model: openai_model,
            api_version: read(global_constants::ENV_AZURE_OPENAI_API_VERSION)
                .unwrap_or_else(|| global_constants::DEFAULT_AZURE_OPENAI_API_VERSION.to_string()),
            max_tokens: parse_or_default(
                global_constants::ENV_MAX_TOKENS,
                read(global_constants::ENV_MAX_TOKENS),
                global_constants::DEFAULT_MAX_TOKENS,
            )?,
        };

        let judge_concurrency = parse_or_default(
            global_constants::ENV_JUDGE_CONCURRENCY,
            read(global_constants::ENV_JUDGE_CONCURRENCY),
            global_constants::DEFAULT_JUDGE_CONCURRENCY,
        )?;
        if judge_concurrency == 0 {
            bail!("{} must be at least 1", global_constants::ENV_JUDGE_CONCURRENCY);
        }

        let http_timeout_secs = parse_or_default(
            global_constants::ENV_HTTP_TIMEOUT_SECS,
            read(global_constants::ENV_HTTP_TIMEOUT_SECS),
            global_constants::DEFAULT_HTTP_TIMEOUT_SECS,
        )?;

        let config = Self {
            custom_vision,
            azure_openai,
            requirements_path: read(global_constants::ENV_REQUIREMENTS_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(global_constants::DEFAULT_REQUIREMENTS_PATH)),
            font_path: read(global_constants::ENV_FONT_PATH).map(PathBuf::from),
            judge_concurrency,
            http_timeout: Duration::from_secs(http_timeout_secs),
        };

        log::info!(
            "[CONFIG] Loaded configuration: detector project {}, judge model {}",
            config.custom_vision.project_id,
            config.azure_openai.model
        );
        log::debug!(
            "[CONFIG] Requirements file: {:?}, font: {:?}, judge concurrency: {}",
            config.requirements_path,
            config.font_path,
            config.judge_concurrency
        );

        Ok(config)
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|error| anyhow::anyhow!("invalid value '{}' for {}: {}", value, key, error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required_values() -> HashMap<&'static str, String> {
        HashMap::from([
            (global_constants::ENV_CUSTOM_VISION_ENDPOINT, "https://vision.example.com".to_string()),
            (global_constants::ENV_CUSTOM_VISION_PREDICTION_KEY, "prediction-key".to_string()),
            (global_constants::ENV_CUSTOM_VISION_PROJECT_ID, "project-1".to_string()),
            (global_constants::ENV_CUSTOM_VISION_MODEL_NAME, "logos-v2".to_string()),
            (global_constants::ENV_AZURE_OPENAI_ENDPOINT, "https://openai.example.com".to_string()),
            (global_constants::ENV_AZURE_OPENAI_API_KEY, "openai-key".to_string()),
            (global_constants::ENV_AZURE_OPENAI_MODEL, "gpt-4o".to_string()),
        ])
    }

    fn load(values: &HashMap<&'static str, String>) -> Result<AppConfig> {
        AppConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_applies_defaults_for_optional_values() {
        let config = load(&required_values()).unwrap();

        assert_eq!(config.custom_vision.project_id, "project-1");
        assert_eq!(config.custom_vision.model_name, "logos-v2");
        assert_eq!(config.azure_openai.model, "gpt-4o");
        assert_eq!(
            config.azure_openai.api_version,
            global_constants::DEFAULT_AZURE_OPENAI_API_VERSION
        );
        assert_eq!(config.azure_openai.max_tokens, 300);
        assert_eq!(
            config.requirements_path,
            PathBuf::from(global_constants::DEFAULT_REQUIREMENTS_PATH)
        );
        assert_eq!(config.font_path, None);
        assert_eq!(config.judge_concurrency, 1);
        assert_eq!(config.http_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_lookup_reports_every_missing_key() {
        let mut values = required_values();
        values.remove(global_constants::ENV_CUSTOM_VISION_PREDICTION_KEY);
        values.remove(global_constants::ENV_AZURE_OPENAI_MODEL);

        let error = load(&values).unwrap_err().to_string();

        assert!(error.contains(global_constants::ENV_CUSTOM_VISION_PREDICTION_KEY));
        assert!(error.contains(global_constants::ENV_AZURE_OPENAI_MODEL));
        assert!(!error.contains(global_constants::ENV_CUSTOM_VISION_ENDPOINT));
    }

    #[test]
    fn test_from_lookup_treats_blank_value_as_missing() {
        let mut values = required_values();
        values.insert(global_constants::ENV_AZURE_OPENAI_API_KEY, "   ".to_string());

        let error = load(&values).unwrap_err().to_string();

        assert!(error.contains(global_constants::ENV_AZURE_OPENAI_API_KEY));
    }

    #[test]
    fn test_from_lookup_reads_optional_overrides() {
        let mut values = required_values();
        values.insert(global_constants::ENV_AZURE_OPENAI_API_VERSION, "2024-06-01".to_string());
        values.insert(global_constants::ENV_MAX_TOKENS, "500".to_string());
        values.insert(global_constants::ENV_JUDGE_CONCURRENCY, "4".to_string());
        values.insert(global_constants::ENV_HTTP_TIMEOUT_SECS, "15".to_string());
        values.insert(global_constants::ENV_REQUIREMENTS_PATH, "/etc/logos.json".to_string());
        values.insert(global_constants::ENV_FONT_PATH, "/usr/share/fonts/dejavu.ttf".to_string());

        let config = load(&values).unwrap();

        assert_eq!(config.azure_openai.api_version, "2024-06-01");
        assert_eq!(config.azure_openai.max_tokens, 500);
        assert_eq!(config.judge_concurrency, 4);
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.requirements_path, PathBuf::from("/etc/logos.json"));
        assert_eq!(
            config.font_path,
            Some(PathBuf::from("/usr/share/fonts/dejavu.ttf"))
        );
    }

    #[test]
    fn test_from_lookup_rejects_unparseable_number() {
        let mut values = required_values();
        values.insert(global_constants::ENV_MAX_TOKENS, "lots".to_string());

        let error = load(&values).unwrap_err().to_string();

        assert!(error.contains(global_constants::ENV_MAX_TOKENS));
    }

    #[test]
    fn test_from_lookup_rejects_zero_concurrency() {
        let mut values = required_values();
        values.insert(global_constants::ENV_JUDGE_CONCURRENCY, "0".to_string());

        assert!(load(&values).is_err());
    }
}
