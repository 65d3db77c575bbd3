//! Report configuration: branding, locale, and the status color palette.

use serde::{Deserialize, Serialize};

use super::format::{self, Locale};
use super::types::Status;
use rust_decimal::Decimal;

/// An RGB color. Renderer-neutral; each backend converts as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pack into `0xRRGGBB`.
    pub fn to_u32(self) -> u32 {
        ((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// Immutable status → fill color lookup, injected into the styled renderers.
///
/// Unrecognized statuses always fall back to the neutral color; the palette
/// cannot produce an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPalette {
    pub pending: Rgb,
    pub approved: Rgb,
    pub rejected: Rgb,
    pub paid: Rgb,
    pub neutral: Rgb,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            pending: Rgb(0xF6, 0xC3, 0x44),  // amber
            approved: Rgb(0x5A, 0xA4, 0x69), // green
            rejected: Rgb(0xE5, 0x73, 0x73), // red
            paid: Rgb(0x64, 0xB5, 0xF6),     // blue
            neutral: Rgb(0xBD, 0xBD, 0xBD),  // gray
        }
    }
}

impl StatusPalette {
    /// Fill color for a status. Active templates read as approved.
    pub fn color(&self, status: &Status) -> Rgb {
        match status {
            Status::Pending => self.pending,
            Status::Approved | Status::Active => self.approved,
            Status::Rejected => self.rejected,
            Status::Paid => self.paid,
            Status::Paused | Status::Other(_) => self.neutral,
        }
    }
}

/// Paper size for the document renderer, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    /// 612 × 792 pt.
    Letter,
    /// 595 × 842 pt.
    A4,
}

impl PaperSize {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::A4 => (595.0, 842.0),
        }
    }
}

/// Branding and locale settings shared by every renderer.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Organization name shown in header bands and fallback brand marks.
    pub organization: String,
    /// Fill color for title bands and detail headers.
    pub brand_color: Rgb,
    /// Secondary color for chart bars and accents.
    pub accent_color: Rgb,
    /// Confidentiality notice printed in document headers.
    pub confidentiality_notice: String,
    /// Number-shaping locale.
    pub locale: Locale,
    /// ISO 4217 currency code for every monetary cell.
    pub currency: String,
    /// Status fill colors.
    pub palette: StatusPalette,
    /// Paper size for documents.
    pub paper: PaperSize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization: "Portal de Pagos".to_string(),
            brand_color: Rgb(0x1F, 0x4E, 0x79),
            accent_color: Rgb(0x2E, 0x75, 0xB6),
            confidentiality_notice:
                "Documento confidencial — uso interno exclusivo".to_string(),
            locale: format::ES_MX,
            currency: "MXN".to_string(),
            palette: StatusPalette::default(),
            paper: PaperSize::Letter,
        }
    }
}

impl ReportConfig {
    /// Format an amount with this config's locale and currency.
    pub fn money(&self, amount: Decimal) -> String {
        format::format_currency(amount, &self.locale, &self.currency)
    }

    /// Compact form for dense contexts (chart labels).
    pub fn money_compact(&self, amount: Decimal) -> String {
        format::format_currency_compact(amount, &self.locale, &self.currency)
    }
}

/// Builder for [`ReportConfig`].
///
/// # Example
///
/// ```
/// use reportes::core::{ReportConfigBuilder, Rgb};
///
/// let config = ReportConfigBuilder::new("Tesorería Central")
///     .brand_color(Rgb(0x1F, 0x4E, 0x79))
///     .currency("MXN")
///     .build();
/// assert_eq!(config.organization, "Tesorería Central");
/// ```
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            config: ReportConfig {
                organization: organization.into(),
                ..Default::default()
            },
        }
    }

    pub fn brand_color(mut self, color: Rgb) -> Self {
        self.config.brand_color = color;
        self
    }

    pub fn accent_color(mut self, color: Rgb) -> Self {
        self.config.accent_color = color;
        self
    }

    pub fn confidentiality_notice(mut self, notice: impl Into<String>) -> Self {
        self.config.confidentiality_notice = notice.into();
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.config.currency = code.into();
        self
    }

    pub fn palette(mut self, palette: StatusPalette) -> Self {
        self.config.palette = palette;
        self
    }

    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.config.paper = paper;
        self
    }

    pub fn build(self) -> ReportConfig {
        self.config
    }
}

/// Injected asset-resolution capability.
///
/// The document renderer asks for the logo once per export and degrades to
/// a deterministic text mark when `None` comes back (or when the bytes do
/// not parse as a supported image). Implementations must not block on the
/// network inside a render call; resolve ahead of time and hand the bytes
/// over from memory.
pub trait AssetSource {
    /// Logo image bytes (JPEG), if available.
    fn logo(&self) -> Option<Vec<u8>>;
}

/// An [`AssetSource`] with no assets; every lookup misses.
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn logo(&self) -> Option<Vec<u8>> {
        None
    }
}

/// Serve a logo from an in-memory buffer.
pub struct StaticAssets {
    logo: Option<Vec<u8>>,
}

impl StaticAssets {
    pub fn with_logo(bytes: Vec<u8>) -> Self {
        Self { logo: Some(bytes) }
    }
}

impl AssetSource for StaticAssets {
    fn logo(&self) -> Option<Vec<u8>> {
        self.logo.clone()
    }
}
