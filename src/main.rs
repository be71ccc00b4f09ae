use std::path::PathBuf;

use anyhow::Context;
use bottling_qc_rs::inspection::{InspectionConfig, InspectionPipeline};
use bottling_qc_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let mut args = std::env::args_os().skip(1);
    let folder = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let overlay_dir = args.next().map(PathBuf::from);

    info!("Starting bottling line inspection...");

    let config = InspectionConfig::default();
    let pipeline = InspectionPipeline::new(config);

    info!(folder = %folder.display(), "Inspection pipeline initialized");
    if let Some(dir) = &overlay_dir {
        info!(overlays = %dir.display(), "Writing annotated overlays");
    }

    let inspections = pipeline
        .inspect_folder(&folder, overlay_dir.as_deref())
        .with_context(|| format!("Failed to inspect {}", folder.display()))?;

    if inspections.is_empty() {
        println!("No images found in the given folder!!!");
        return Ok(());
    }

    let mut rejected = 0usize;
    for inspection in &inspections {
        let name = inspection
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| inspection.path.display().to_string());

        println!("\nProcessing Image: {}", name);
        match &inspection.result {
            Ok(outcome) => {
                for issue in outcome.report.issues() {
                    println!("{}", issue);
                }
                if !outcome.report.passed() {
                    rejected += 1;
                }
            }
            Err(e) => {
                rejected += 1;
                error!(file = %name, "Inspection failed: {}", e);
            }
        }
        println!();
    }

    info!(
        inspected = inspections.len(),
        rejected,
        "Inspection run complete"
    );

    Ok(())
}
