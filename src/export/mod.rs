//! Export orchestration: the one entry point the host application calls.
//!
//! Pipeline per call: resolve "now" once → range-filter → aggregate →
//! dispatch to the requested renderer → wrap the bytes in an [`Artifact`].
//! The engine holds no state between calls; the artifact is the hand-off
//! boundary to whatever download mechanism the host uses.

use chrono::{DateTime, Utc};
use log::debug;

use crate::core::{
    Column, Period, Record, ReportConfig, ReportError, aggregate, filter_by_period,
    payment_request_columns, processed_payment_columns, recurring_template_columns,
    travel_expense_columns,
};
use crate::core::{AssetSource, NoAssets};

/// The three artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Parse a format key. Unknown keys are the one input error that must
    /// surface to the caller instead of being absorbed.
    pub fn from_key(key: &str) -> Result<Self, ReportError> {
        match key.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ReportError::UnsupportedFormat(key.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Pdf => "application/pdf",
        }
    }
}

/// The four report types the portal exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    PaymentRequests,
    RecurringTemplates,
    TravelExpenses,
    ProcessedPayments,
}

impl ReportKind {
    /// Column set for this report's detail table.
    pub fn columns(&self) -> Vec<Column> {
        match self {
            Self::PaymentRequests => payment_request_columns(),
            Self::RecurringTemplates => recurring_template_columns(),
            Self::TravelExpenses => travel_expense_columns(),
            Self::ProcessedPayments => processed_payment_columns(),
        }
    }

    /// ASCII stem used in filenames.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::PaymentRequests => "SolicitudesDePago",
            Self::RecurringTemplates => "PagosRecurrentes",
            Self::TravelExpenses => "Viaticos",
            Self::ProcessedPayments => "PagosProcesados",
        }
    }

    /// Display title used in bands and sheet names.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PaymentRequests => "Solicitudes de Pago",
            Self::RecurringTemplates => "Pagos Recurrentes",
            Self::TravelExpenses => "Viáticos y Gastos de Viaje",
            Self::ProcessedPayments => "Pagos Procesados",
        }
    }
}

/// What to export and how.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest {
    pub kind: ReportKind,
    pub period: Period,
    pub format: ExportFormat,
    /// Append the categorical bar-chart page (PDF only).
    pub with_chart: bool,
}

impl ExportRequest {
    pub fn new(kind: ReportKind, period: Period, format: ExportFormat) -> Self {
        Self {
            kind,
            period,
            format,
            with_chart: false,
        }
    }

    pub fn with_chart(mut self, with_chart: bool) -> Self {
        self.with_chart = with_chart;
        self
    }
}

/// A finished export: bytes plus the metadata the download layer needs.
///
/// Created synchronously per call and never retained by the engine.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Run one export against the wall clock.
///
/// Calling this twice with identical arguments produces byte-identical
/// artifacts apart from the embedded generation timestamp; see
/// [`export_report_at`] for the deterministic variant.
pub fn export_report(
    records: &[Record],
    request: &ExportRequest,
    config: &ReportConfig,
    assets: &dyn AssetSource,
) -> Result<Artifact, ReportError> {
    export_report_at(records, request, config, assets, Utc::now())
}

/// Run one export with an explicit "now" — the instant the period window is
/// anchored to and the timestamp embedded in the artifacts.
pub fn export_report_at(
    records: &[Record],
    request: &ExportRequest,
    config: &ReportConfig,
    assets: &dyn AssetSource,
    now: DateTime<Utc>,
) -> Result<Artifact, ReportError> {
    let filtered = filter_by_period(records, request.period, now);
    let summary = aggregate(&filtered);
    let columns = request.kind.columns();
    let title = request.kind.title();

    debug!(
        "export {:?} {:?} {:?}: {} of {} records in window",
        request.kind,
        request.period,
        request.format,
        filtered.len(),
        records.len()
    );

    let bytes = match request.format {
        ExportFormat::Csv => crate::csv::render_csv(&filtered, &columns).into_bytes(),
        ExportFormat::Xlsx => crate::xlsx::render_spreadsheet(
            &filtered,
            &summary,
            &columns,
            title,
            config,
            now,
        )?,
        ExportFormat::Pdf => crate::pdf::render_document(
            &filtered,
            &summary,
            &columns,
            title,
            request.period.label_es(),
            config,
            assets,
            now,
            request.with_chart,
        )?,
    };

    Ok(Artifact {
        filename: format!(
            "{}_{}.{}",
            request.kind.file_stem(),
            request.period.as_key(),
            request.format.extension()
        ),
        mime: request.format.mime(),
        bytes,
    })
}

/// Convenience wrapper for hosts without a logo pipeline.
pub fn export_report_plain(
    records: &[Record],
    request: &ExportRequest,
    config: &ReportConfig,
) -> Result<Artifact, ReportError> {
    export_report(records, request, config, &NoAssets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_keys_parse_case_insensitively() {
        assert_eq!(ExportFormat::from_key("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_key("Pdf").unwrap(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::from_key("excel").unwrap(), ExportFormat::Xlsx);
    }

    #[test]
    fn unknown_format_is_reported_not_absorbed() {
        let err = ExportFormat::from_key("xml").unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFormat(ref k) if k == "xml"));
    }

    #[test]
    fn filename_encodes_report_and_period() {
        let request = ExportRequest::new(
            ReportKind::TravelExpenses,
            Period::Week,
            ExportFormat::Csv,
        );
        let artifact = export_report_plain(&[], &request, &ReportConfig::default()).unwrap();
        assert_eq!(artifact.filename, "Viaticos_semana.csv");
        assert_eq!(artifact.mime, "text/csv");
    }
}
