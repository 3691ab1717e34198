//! Chart snapshot capability
//!
//! The report never reads the dashboard itself. It asks a
//! [`SnapshotRenderer`] for pixels of the chart instead, which keeps the
//! layout pure and lets tests swap in a failing or fixed renderer.

use async_trait::async_trait;
use contas_core::chart::{ChartData, Rgb};
use std::f64::consts::PI;
use std::sync::Arc;

use crate::error::{ReportError, ReportResult};

/// Background behind the chart, matching the dashboard card
pub const SNAPSHOT_BACKGROUND: Rgb = Rgb(0x1e, 0x29, 0x3b);

/// Logical size of the chart panel before scaling
pub const BASE_WIDTH: u32 = 400;
pub const BASE_HEIGHT: u32 = 320;

/// Tightly packed 8-bit RGB pixels, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Snapshot {
    /// Colour at a pixel, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        let p = self.pixels.get(i..i + 3)?;
        Some(Rgb(p[0], p[1], p[2]))
    }
}

/// Renderer reference type
pub type RendererRef = Arc<dyn SnapshotRenderer>;

/// Produces a raster image of the expense chart
#[async_trait]
pub trait SnapshotRenderer: Send + Sync {
    async fn capture(&self, chart: &ChartData, scale: u32) -> ReportResult<Snapshot>;
}

/// Default renderer: draws the pie and its legend swatches directly
#[derive(Debug, Default)]
pub struct PieRasterizer;

#[async_trait]
impl SnapshotRenderer for PieRasterizer {
    async fn capture(&self, chart: &ChartData, scale: u32) -> ReportResult<Snapshot> {
        let chart = chart.clone();
        tokio::task::spawn_blocking(move || rasterize(&chart, scale))
            .await
            .map_err(|e| ReportError::Snapshot { message: e.to_string() })?
    }
}

/// Draw the chart: pie starting at 12 o'clock going clockwise, legend below
pub fn rasterize(chart: &ChartData, scale: u32) -> ReportResult<Snapshot> {
    if scale == 0 {
        return Err(ReportError::Snapshot {
            message: "scale must be at least 1".to_string(),
        });
    }

    // cumulative end angle of each visible slice
    let mut bounds: Vec<(f64, Rgb)> = Vec::new();
    let mut acc = 0.0;
    for slice in chart.visible_slices() {
        acc += slice.fraction(chart.total) * 2.0 * PI;
        bounds.push((acc, slice.color));
    }
    if bounds.is_empty() {
        return Err(ReportError::Snapshot {
            message: "chart has no visible slices".to_string(),
        });
    }

    let width = BASE_WIDTH * scale;
    let height = BASE_HEIGHT * scale;
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);

    let cx = width as f64 / 2.0;
    let cy = height as f64 * 0.42;
    let radius = (width.min(height) as f64) * 0.34;

    let swatch = (12 * scale) as f64;
    let legend_y = height as f64 * 0.88;
    let legend: Vec<(f64, Rgb)> = chart
        .slices
        .iter()
        .enumerate()
        .map(|(i, s)| (width as f64 * (0.25 + 0.4 * i as f64), s.color))
        .collect();

    for py in 0..height {
        for px in 0..width {
            let x = px as f64 + 0.5;
            let y = py as f64 + 0.5;
            let dx = x - cx;
            let dy = y - cy;

            let mut color = SNAPSHOT_BACKGROUND;
            if dx * dx + dy * dy <= radius * radius {
                let mut angle = dx.atan2(-dy);
                if angle < 0.0 {
                    angle += 2.0 * PI;
                }
                color = bounds
                    .iter()
                    .find(|(end, _)| angle <= *end)
                    .or_else(|| bounds.last())
                    .map(|(_, c)| *c)
                    .unwrap_or(SNAPSHOT_BACKGROUND);
            } else if (y - legend_y).abs() <= swatch / 2.0 {
                if let Some((_, c)) = legend.iter().find(|(lx, _)| (x - lx).abs() <= swatch / 2.0) {
                    color = *c;
                }
            }

            pixels.extend_from_slice(&[color.0, color.1, color.2]);
        }
    }

    log::debug!(target: "contas::report", "Rasterized chart at {}x{}", width, height);
    Ok(Snapshot { width, height, pixels })
}
