mod adapters;
mod core;
mod global_constants;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{AzureOpenAiComplianceJudge, CustomVisionLogoDetector};
use crate::core::compliance::RequirementsStore;
use crate::core::imaging::DetectionAnnotator;
use crate::core::models::AppConfig;
use crate::core::orchestrators::ComplianceOrchestrator;

async fn build_orchestrator(config: &AppConfig) -> Result<ComplianceOrchestrator> {
    let logo_detector = Arc::new(CustomVisionLogoDetector::build(
        config.custom_vision.clone(),
        config.http_timeout,
    )?);
    let compliance_judge = Arc::new(AzureOpenAiComplianceJudge::build(
        config.azure_openai.clone(),
        config.http_timeout,
    )?);
    let requirements_store = Arc::new(RequirementsStore::load(&config.requirements_path).await?);
    let annotator = Arc::new(DetectionAnnotator::load(config.font_path.as_deref()).await?);

    Ok(ComplianceOrchestrator::build(
        logo_detector,
        compliance_judge,
        requirements_store,
        annotator,
    )
    .with_judge_concurrency(config.judge_concurrency))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_NAME);

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        anyhow::bail!(global_constants::USAGE);
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let orchestrator = build_orchestrator(&config).await?;

    let image = image::open(&image_path)
        .with_context(|| format!("Failed to open image {}", image_path))?;
    let result = orchestrator.run(&image).await?;

    let written = report::write_outputs(&result, &output_dir).await?;

    for record in &result.records {
        println!("{}", record.verdict_json);
    }
    log::info!(
        "[MAIN] Annotated image at {:?}, report at {:?}, {} detections without verdict",
        written.annotated_image_path,
        written.report_path,
        result.skipped.len()
    );
    Ok(())
}
