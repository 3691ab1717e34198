//! Error types for contas-report

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Zero balance and no bills
    #[error("Nothing to export: set a balance or add a bill first")]
    NothingToExport,

    #[error("Chart snapshot failed: {message}")]
    Snapshot { message: String },

    #[error("PDF generation failed: {message}")]
    Pdf { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
