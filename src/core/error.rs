use thiserror::Error;

/// Errors that can surface from the export pipeline.
///
/// Per-field coercion failures and missing optional assets are *not* errors:
/// they are recovered locally with safe defaults so that a best-effort
/// artifact is always produced. Only conditions that make the requested
/// artifact impossible end up here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The orchestrator was invoked with an unrecognized format key.
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),

    /// The spreadsheet backend rejected the workbook.
    #[error("spreadsheet error: {0}")]
    Xlsx(String),

    /// The document backend failed to serialize the page tree.
    #[error("document error: {0}")]
    Pdf(String),

    /// Table layout could not fit the requested columns on the page.
    #[error("layout error: {0}")]
    Layout(String),

    /// The input payload was not a JSON array of records.
    #[error("input error: {0}")]
    Input(String),
}
