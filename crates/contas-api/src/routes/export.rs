//! PDF report download

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use contas_core::{schedule, DefaultErrorLogger, ErrorContext, ErrorLogger};
use contas_report::{ReportError, ReportInput};

use crate::{ApiError, AppState};

/// Download the report as an attachment, 409 when there is nothing to export
///
/// Stored state is flushed first; a storage failure answers 500.
pub async fn download_report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let input = {
        let tracker = state.tracker.read().await;
        if !tracker.export_enabled() {
            return Err(ReportError::NothingToExport.into());
        }
        if let Err(e) = tracker.flush() {
            DefaultErrorLogger.log_error(&e, &ErrorContext::new("export"));
            return Err(e.into());
        }
        ReportInput::from_tracker(&tracker, schedule::today(), &state.config.report.author)
    };

    let artifact = state.exporter.export(&input).await?;
    log::info!(target: "contas::api", "Serving report {}", artifact.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
