//! PDF report export
//!
//! [`Exporter::export`] lays out the report, asks the snapshot renderer
//! for the chart page and writes the PDF. A failed chart capture only
//! drops that page.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod snapshot;

use contas_config::ReportConfig;
use contas_core::expense_chart;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::{ReportError, ReportResult};
pub use layout::{ReportBuilder, ReportDocument, ReportInput};
pub use pdf::PdfWriter;
pub use snapshot::{PieRasterizer, RendererRef, Snapshot, SnapshotRenderer};

/// A finished report
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct Exporter {
    renderer: RendererRef,
    include_chart: bool,
    chart_scale: u32,
}

impl Exporter {
    /// Exporter using the built-in pie rasterizer
    pub fn new(config: &ReportConfig) -> Self {
        Self::with_renderer(config, Arc::new(PieRasterizer))
    }

    pub fn with_renderer(config: &ReportConfig, renderer: RendererRef) -> Self {
        Self {
            renderer,
            include_chart: config.include_chart,
            chart_scale: config.chart_scale,
        }
    }

    /// Build the PDF, or `NothingToExport` with a zero balance and no bills
    pub async fn export(&self, input: &ReportInput) -> ReportResult<ReportArtifact> {
        if !input.summary.export_enabled() {
            return Err(ReportError::NothingToExport);
        }

        let snapshot = self.capture_chart(input).await;
        let document = ReportBuilder::new(input).build(snapshot);
        let bytes = PdfWriter.render(&document)?;

        log::info!(
            target: "contas::report",
            "Generated report with {} pages ({} bytes)",
            document.pages.len(),
            bytes.len()
        );

        Ok(ReportArtifact {
            file_name: input.file_name(),
            bytes,
        })
    }

    /// Export and write the file into `dir`, creating it when needed
    pub async fn export_to_dir(&self, input: &ReportInput, dir: &Path) -> ReportResult<PathBuf> {
        let artifact = self.export(input).await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.bytes).await?;
        log::info!(target: "contas::report", "Report written to {}", path.display());
        Ok(path)
    }

    async fn capture_chart(&self, input: &ReportInput) -> Option<Snapshot> {
        if !self.include_chart || input.bills.is_empty() {
            return None;
        }
        let totals = &input.summary.categories;
        let chart = expense_chart(totals.fixed_total, totals.variable_total)?;

        match self.renderer.capture(&chart, self.chart_scale).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!(target: "contas::report", "Could not capture the chart: {}", e);
                None
            }
        }
    }
}
