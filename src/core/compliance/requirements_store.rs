use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no compliance requirements found for logo '{label}'")]
pub struct RequirementsNotFound {
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequirementsEntry {
    Checklist(Vec<String>),
    Single(String),
}

impl From<RequirementsEntry> for Vec<String> {
    fn from(entry: RequirementsEntry) -> Self {
        match entry {
            RequirementsEntry::Checklist(questions) => questions,
            RequirementsEntry::Single(question) => vec![question],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequirementsStore {
    requirements: HashMap<String, Vec<String>>,
}

impl RequirementsStore {
    #[cfg(test)]
    pub fn from_map(requirements: HashMap<String, Vec<String>>) -> Self {
        Self { requirements }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let entries: HashMap<String, RequirementsEntry> =
            serde_json::from_str(contents).context("Failed to parse logo requirements JSON")?;

        let requirements = entries
            .into_iter()
            .map(|(label, entry)| (label, Vec::from(entry)))
            .collect();

        Ok(Self { requirements })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        log::info!("[RULES] Loading logo requirements from {:?}", path);

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read logo requirements file {:?}", path))?;
        let store = Self::from_json_str(&contents)?;

        if store.is_empty() {
            log::warn!("[RULES] {:?} lists no logos, every detection will be skipped", path);
        }
        log::info!("[RULES] Loaded requirements for {} logos", store.len());
        Ok(store)
    }

    pub fn lookup(&self, label: &str) -> Result<&[String], RequirementsNotFound> {
        self.requirements
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| RequirementsNotFound {
                label: label.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
