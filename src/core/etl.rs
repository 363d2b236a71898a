use crate::core::{Artifacts, Diagnostic, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs fetch, assembly and output in turn. Only the output stage can
    /// fail the run; everything before it degrades to empty days.
    pub async fn run(&self) -> Result<Artifacts> {
        let started = Instant::now();
        tracing::info!("Starting menu ETL process");

        tracing::info!("Extracting day pages...");
        let documents = self.pipeline.extract().await?;
        let fetched = documents.iter().filter(|d| d.body.is_ok()).count();
        tracing::info!("Fetched {} of {} days", fetched, documents.len());

        tracing::info!("Assembling week...");
        let assembly = self.pipeline.transform(documents).await?;
        log_diagnostics(&assembly.diagnostics);
        let unresolved = assembly.unresolved_images();
        if !unresolved.is_empty() {
            tracing::warn!(
                "⚠️ {} image(s) missing from the name table: {}",
                unresolved.len(),
                unresolved.join(", ")
            );
        }
        tracing::info!(
            "Assembled {} restaurants for {} week {}",
            assembly.week.restaurant_count(),
            assembly.week.city,
            assembly.week.week_number
        );

        tracing::info!("Writing output...");
        let artifacts = self.pipeline.load(assembly.week).await?;
        tracing::info!(
            "Output saved to {} ({:?})",
            artifacts.json_path,
            started.elapsed()
        );

        Ok(artifacts)
    }
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let failed_days = diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::FetchFailed { .. }))
        .count();
    let skipped = diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::SegmentSkipped { .. }))
        .count();

    tracing::warn!(
        "{} diagnostics: {} failed day(s), {} skipped restaurant(s)",
        diagnostics.len(),
        failed_days,
        skipped
    );
    for diagnostic in diagnostics {
        tracing::debug!("  {}", diagnostic);
    }
}
