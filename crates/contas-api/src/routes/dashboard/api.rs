//! Dashboard page handler and JSON summaries

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use contas_core::chart::ChartData;
use contas_core::{schedule, Summary, Tip, Tracker};
use rust_decimal::Decimal;
use serde::Serialize;

use super::page::{render_dashboard, FormState};
use crate::{page_response, AppState};

/// `#dashboard` fragment for the current state
pub fn dashboard_fragment(tracker: &Tracker, pending: Option<&FormState>) -> Html<String> {
    Html(render_dashboard(tracker, schedule::today(), pending))
}

/// Dashboard page
pub async fn page_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let tracker = state.tracker.read().await;
    let inner = render_dashboard(&tracker, schedule::today(), None);
    Html(page_response(&headers, "Painel", &inner))
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: Summary,
    pub spend_percent: Decimal,
    pub export_enabled: bool,
}

/// Totals shown on the summary cards (JSON API)
pub async fn api_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let tracker = state.tracker.read().await;
    let summary = tracker.summary();
    Json(SummaryResponse {
        spend_percent: summary.spend_percent(),
        export_enabled: summary.export_enabled(),
        summary,
    })
}

/// Current tips (JSON API)
pub async fn api_tips(State(state): State<AppState>) -> Json<Vec<Tip>> {
    let tracker = state.tracker.read().await;
    Json(tracker.tips())
}

/// Chart slices, `null` when there are no expenses (JSON API)
pub async fn api_chart(State(state): State<AppState>) -> Json<Option<ChartData>> {
    let tracker = state.tracker.read().await;
    Json(tracker.chart())
}
