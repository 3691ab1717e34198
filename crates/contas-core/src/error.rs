//! Error types for contas-core
//!
//! Errors carry a stable code, a severity and a list of suggestions so
//! the web layer and the CLI can report them the same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::FieldErrors;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bill not found
    BillNotFound,
    /// Form validation failed
    ValidationError,
    /// Persisted state could not be read or written
    StorageError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::BillNotFound => write!(f, "BILL_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for contas-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Bill not found: {id}")]
    BillNotFound { id: String },

    #[error("Validation error: {errors}")]
    ValidationError { errors: FieldErrors },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::BillNotFound { .. } => ErrorCode::BillNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::StorageError { .. } => ErrorCode::StorageError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::BillNotFound { .. } => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::StorageError { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::BillNotFound { id } => {
                details = details.with_detail(serde_json::json!({ "id": id }));
                details = details.with_suggestion(
                    "The bill may have been removed; reload the page.".to_string(),
                );
                details = details.with_suggestion(
                    "Use the /api/bills endpoint to list all bills.".to_string(),
                );
            }
            CoreError::ValidationError { errors } => {
                details = details.with_detail(serde_json::json!({ "fields": errors }));
                details = details.with_suggestion(
                    "Fix the highlighted fields and submit again.".to_string(),
                );
            }
            CoreError::StorageError { .. } => {
                details = details.with_suggestion(
                    "Check that storage.path is writable.".to_string(),
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<contas_store::StoreError> for CoreError {
    fn from(error: contas_store::StoreError) -> Self {
        CoreError::StorageError {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Bill the operation targeted, if any
    pub bill_id: Option<String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            bill_id: None,
        }
    }

    /// Attach the targeted bill
    pub fn with_bill_id(mut self, id: impl Into<String>) -> Self {
        self.bill_id = Some(id.into());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => log::warn!(
                target: "contas::error",
                "[{}] {} - Operation: {} - Bill: {:?}",
                error.code(),
                error,
                context.operation,
                context.bill_id
            ),
            ErrorSeverity::Error => log::error!(
                target: "contas::error",
                "ERROR [{}] {} - Operation: {} - Bill: {:?}",
                error.code(),
                error.to_details(),
                context.operation,
                context.bill_id
            ),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "contas::error",
            "WARNING: {} - Operation: {} - Bill: {:?}",
            message,
            context.operation,
            context.bill_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::BillNotFound.to_string(), "BILL_NOT_FOUND");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::BillNotFound { id: "1".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Info);

        let error = CoreError::StorageError { message: "disk full".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_details_bill_not_found() {
        let error = CoreError::BillNotFound { id: "1717".to_string() };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::BillNotFound);
        assert!(details.message.contains("1717"));
        assert_eq!(details.suggestions.len(), 2);
        assert_eq!(details.details, Some(serde_json::json!({ "id": "1717" })));
    }

    #[test]
    fn test_validation_details_list_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Nome da conta é obrigatório");
        let details = CoreError::ValidationError { errors }.to_details();
        assert_eq!(details.code, ErrorCode::ValidationError);
        assert_eq!(
            details.details,
            Some(serde_json::json!({ "fields": { "name": "Nome da conta é obrigatório" } }))
        );
    }

    #[test]
    fn test_store_error_converts() {
        let error: CoreError = contas_store::StoreError::Poisoned.into();
        assert_eq!(error.code(), ErrorCode::StorageError);
    }

    #[test]
    fn test_error_context_builder() {
        let context = ErrorContext::new("edit_bill").with_bill_id("42");
        assert_eq!(context.operation, "edit_bill");
        assert_eq!(context.bill_id.as_deref(), Some("42"));
    }
}
