//! Balance card endpoints

use axum::extract::State;
use axum::response::Html;

use crate::routes::dashboard::api::dashboard_fragment;
use crate::{parse_form, AppState};

/// Save the starting balance
///
/// Text that does not parse counts as zero. A negative value is ignored and
/// the input stays open.
pub async fn htmx_balance_save(State(state): State<AppState>, body: String) -> Html<String> {
    let params = parse_form(&body);
    let raw = params.get("balance").map(String::as_str).unwrap_or("");

    let mut tracker = state.tracker.write().await;
    tracker.set_balance_input(raw);
    dashboard_fragment(&tracker, None)
}

pub async fn htmx_balance_edit(State(state): State<AppState>) -> Html<String> {
    let mut tracker = state.tracker.write().await;
    tracker.begin_balance_edit();
    dashboard_fragment(&tracker, None)
}

pub async fn htmx_balance_cancel(State(state): State<AppState>) -> Html<String> {
    let mut tracker = state.tracker.write().await;
    tracker.cancel_balance_edit();
    dashboard_fragment(&tracker, None)
}
