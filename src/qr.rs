//! QR matrix construction.

use std::fmt;

use qrcode::QrCode;

use crate::design::{EcLevel, QrDesign};

#[derive(Debug)]
pub enum QrError {
    Encode(qrcode::types::QrError),
}

impl fmt::Display for QrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrError::Encode(e) => write!(f, "QR encoding failed: {e}"),
        }
    }
}

impl std::error::Error for QrError {}

impl From<qrcode::types::QrError> for QrError {
    fn from(err: qrcode::types::QrError) -> Self {
        QrError::Encode(err)
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// A built symbol: the dark-module matrix plus the facts the preview and
/// details panes report.
#[derive(Debug, Clone, PartialEq)]
pub struct QrOutcome {
    /// Row-major dark flags, `width * width` entries.
    pub modules: Vec<bool>,
    /// Modules per side, quiet zone not included.
    pub width: usize,
    /// Symbol version, e.g. "3" or "M2".
    pub version: String,
    pub dark_count: usize,
}

impl QrOutcome {
    /// Whether the module at (x, y) is dark. Out-of-range lookups are light,
    /// which lets renderers overscan without bounds juggling.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.width {
            return false;
        }
        self.modules.get(y * self.width + x).copied().unwrap_or(false)
    }
}

/// Encode the design's data at its error correction level.
pub fn build(design: &QrDesign) -> Result<QrOutcome, QrError> {
    let code = QrCode::with_error_correction_level(design.data.as_bytes(), design.ec_level.into())?;
    let width = code.width();
    let modules: Vec<bool> = code
        .to_colors()
        .into_iter()
        .map(|color| color == qrcode::Color::Dark)
        .collect();
    let dark_count = modules.iter().filter(|dark| **dark).count();
    let version = match code.version() {
        qrcode::Version::Normal(n) => n.to_string(),
        qrcode::Version::Micro(n) => format!("M{n}"),
    };
    tracing::debug!(version = %version, width, dark_count, "symbol built");
    Ok(QrOutcome { modules, width, version, dark_count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_square_matrix() {
        let outcome = build(&QrDesign::default()).unwrap();
        assert_eq!(outcome.modules.len(), outcome.width * outcome.width);
        assert!(outcome.width >= 21);
        assert!(outcome.dark_count > 0);
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        let outcome = build(&QrDesign::default()).unwrap();
        assert!(outcome.is_dark(0, 0));
        assert!(outcome.is_dark(outcome.width - 1, 0));
        assert!(outcome.is_dark(0, outcome.width - 1));
    }

    #[test]
    fn out_of_range_lookup_is_light() {
        let outcome = build(&QrDesign::default()).unwrap();
        assert!(!outcome.is_dark(outcome.width, 0));
        assert!(!outcome.is_dark(0, outcome.width + 5));
    }

    #[test]
    fn higher_correction_grows_the_symbol() {
        let mut design = QrDesign::default();
        design.data = "https://example.com/some/longer/path?with=query".into();
        design.ec_level = EcLevel::L;
        let low = build(&design).unwrap();
        design.ec_level = EcLevel::H;
        let high = build(&design).unwrap();
        assert!(high.width >= low.width);
    }

    #[test]
    fn oversized_payload_reports_an_error() {
        let mut design = QrDesign::default();
        design.data = "x".repeat(8000);
        let err = build(&design).unwrap_err();
        assert!(matches!(err, QrError::Encode(_)));
    }

    #[test]
    fn empty_data_still_encodes() {
        let mut design = QrDesign::default();
        design.data = String::new();
        let outcome = build(&design).unwrap();
        assert_eq!(outcome.version, "1");
    }
}
