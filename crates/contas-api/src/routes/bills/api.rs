//! Bill endpoints
//!
//! The HTMX handlers mutate the tracker under the write lock and answer with
//! the re-rendered dashboard.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use contas_core::{
    schedule, BillEntry, BillForm, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger,
};

use crate::routes::dashboard::api::dashboard_fragment;
use crate::routes::dashboard::{FormState, FormTarget};
use crate::{parse_form, ApiError, AppState};

/// Bills sorted by due date, each flagged against today (JSON API)
pub async fn api_bills(State(state): State<AppState>) -> Json<Vec<BillEntry>> {
    let tracker = state.tracker.read().await;
    Json(tracker.entries(schedule::today()))
}

fn bill_form(body: &str) -> BillForm {
    let mut params = parse_form(body);
    let mut take = |key: &str| params.remove(key).unwrap_or_default();
    BillForm {
        name: take("name"),
        amount: take("amount"),
        due_date: take("due_date"),
        category: take("category"),
        note: take("note"),
    }
}

/// Show or hide the add form
pub async fn htmx_form_toggle(State(state): State<AppState>) -> Html<String> {
    let mut tracker = state.tracker.write().await;
    tracker.toggle_form();
    dashboard_fragment(&tracker, None)
}

/// Add a bill; a rejected form comes back with its values and messages
pub async fn htmx_bill_store(State(state): State<AppState>, body: String) -> Result<Html<String>, ApiError> {
    let form = bill_form(&body);
    let mut tracker = state.tracker.write().await;

    match tracker.submit_new(&form) {
        Ok(_) => Ok(dashboard_fragment(&tracker, None)),
        Err(CoreError::ValidationError { errors }) => {
            DefaultErrorLogger.log_warning(&errors.to_string(), &ErrorContext::new("add_bill"));
            let pending = FormState {
                target: FormTarget::New,
                form,
                errors,
            };
            Ok(dashboard_fragment(&tracker, Some(&pending)))
        }
        Err(e) => {
            DefaultErrorLogger.log_error(&e, &ErrorContext::new("add_bill"));
            Err(e.into())
        }
    }
}

/// Put a row in edit mode
pub async fn htmx_bill_edit(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, ApiError> {
    let mut tracker = state.tracker.write().await;
    if !tracker.begin_edit(&id) {
        return Err(CoreError::BillNotFound { id }.into());
    }
    Ok(dashboard_fragment(&tracker, None))
}

/// Save an edited row
pub async fn htmx_bill_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Html<String>, ApiError> {
    let form = bill_form(&body);
    let mut tracker = state.tracker.write().await;
    let context = ErrorContext::new("edit_bill").with_bill_id(id.as_str());

    match tracker.submit_edit(&id, &form) {
        Ok(_) => Ok(dashboard_fragment(&tracker, None)),
        Err(CoreError::ValidationError { errors }) => {
            DefaultErrorLogger.log_warning(&errors.to_string(), &context);
            let pending = FormState {
                target: FormTarget::Edit(id),
                form,
                errors,
            };
            Ok(dashboard_fragment(&tracker, Some(&pending)))
        }
        Err(e) => {
            DefaultErrorLogger.log_error(&e, &context);
            Err(e.into())
        }
    }
}

/// Leave edit mode without saving
pub async fn htmx_bill_cancel(State(state): State<AppState>, Path(_id): Path<String>) -> Html<String> {
    let mut tracker = state.tracker.write().await;
    tracker.cancel_edit();
    dashboard_fragment(&tracker, None)
}

/// Delete a bill; unknown ids leave the list unchanged
pub async fn htmx_bill_delete(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    let mut tracker = state.tracker.write().await;
    tracker.remove_bill(&id);
    dashboard_fragment(&tracker, None)
}
