//! Error types for contas-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contas_core::CoreError;
use contas_report::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// The request is valid but the current state does not allow it
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalError { .. } | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::BillNotFound { id } => ApiError::NotFound {
                resource: format!("bill {}", id),
            },
            CoreError::ValidationError { errors } => ApiError::BadRequest {
                message: errors.to_string(),
            },
            CoreError::StorageError { message } => ApiError::InternalError { message },
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::NothingToExport => ApiError::Conflict { message: e.to_string() },
            other => ApiError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "contas::api", "{}", self);
        } else {
            log::debug!(target: "contas::api", "{}", self);
        }
        let body = format!(
            "<div class='p-4 bg-red-900/40 border border-red-700 rounded-lg text-red-300'>{}</div>",
            contas_utils::escape_html(&self.to_string())
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contas_core::FieldErrors;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = CoreError::BillNotFound { id: "x".to_string() }.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let mut errors = FieldErrors::new();
        errors.insert("name", "Nome da conta é obrigatório");
        let invalid: ApiError = CoreError::ValidationError { errors }.into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let conflict: ApiError = ReportError::NothingToExport.into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let pdf: ApiError = ReportError::Pdf { message: "boom".to_string() }.into();
        assert_eq!(pdf.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
