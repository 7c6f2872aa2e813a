use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::models::{ComplianceRecord, PipelineResult};
use crate::global_constants;

pub fn render_markdown_report(records: &[ComplianceRecord]) -> String {
    let [crop_header, verdict_header] = global_constants::REPORT_HEADERS;
    let mut report = format!("| {} | {} |\n| --- | --- |\n", crop_header, verdict_header);

    for record in records {
        report.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&record.crop_markdown),
            escape_cell(&record.verdict_json)
        ));
    }

    report
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

pub struct WrittenOutputs {
    pub annotated_image_path: PathBuf,
    pub report_path: PathBuf,
}

pub async fn write_outputs(result: &PipelineResult, output_dir: &Path) -> Result<WrittenOutputs> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let annotated_image_path = output_dir.join(global_constants::ANNOTATED_IMAGE_FILE_NAME);
    result
        .annotated_image
        .save(&annotated_image_path)
        .with_context(|| format!("Failed to write annotated image {:?}", annotated_image_path))?;

    let report_path = output_dir.join(global_constants::REPORT_FILE_NAME);
    tokio::fs::write(&report_path, render_markdown_report(&result.records))
        .await
        .with_context(|| format!("Failed to write compliance report {:?}", report_path))?;

    log::info!(
        "[REPORT] Wrote {:?} and {:?} ({} rows)",
        annotated_image_path,
        report_path,
        result.records.len()
    );

    Ok(WrittenOutputs {
        annotated_image_path,
        report_path,
    })
}
