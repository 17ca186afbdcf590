//! The design state that every frontend edits and every renderer consumes.

use serde::{Deserialize, Serialize};

/// Error correction level for the encoded symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

    /// Human-readable label including the recoverable damage budget.
    pub fn label(self) -> &'static str {
        match self {
            EcLevel::L => "Low (7%)",
            EcLevel::M => "Medium (15%)",
            EcLevel::Q => "Quartile (25%)",
            EcLevel::H => "High (30%)",
        }
    }

    /// Stable identifier used in files and on the command line.
    pub fn value(self) -> &'static str {
        match self {
            EcLevel::L => "l",
            EcLevel::M => "m",
            EcLevel::Q => "q",
            EcLevel::H => "h",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }
}

/// Geometry drawn for each dark module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotShape {
    #[default]
    Square,
    Round,
    Diamond,
}

impl DotShape {
    pub const ALL: [DotShape; 3] = [DotShape::Square, DotShape::Round, DotShape::Diamond];

    pub fn label(self) -> &'static str {
        match self {
            DotShape::Square => "Square",
            DotShape::Round => "Round",
            DotShape::Diamond => "Diamond",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            DotShape::Square => "square",
            DotShape::Round => "round",
            DotShape::Diamond => "diamond",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// The full set of editable design parameters.
///
/// `logo` holds a `data:` URL (or the empty string for none) so that a design
/// file round-trips without dragging the original image file along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrDesign {
    pub data: String,
    pub module_size: f64,
    pub dot_scale: f64,
    pub quiet_zone: f64,
    pub foreground: String,
    pub background: String,
    pub transparent: bool,
    pub ec_level: EcLevel,
    pub dot_shape: DotShape,
    pub art_prompt: String,
    pub logo: String,
}

impl Default for QrDesign {
    fn default() -> Self {
        Self {
            data: String::from("https://example.com"),
            module_size: 8.0,
            dot_scale: 0.85,
            quiet_zone: 2.0,
            foreground: String::from("#1a1a2e"),
            background: String::from("#ffffff"),
            transparent: false,
            ec_level: EcLevel::M,
            dot_shape: DotShape::Square,
            art_prompt: String::new(),
            logo: String::new(),
        }
    }
}

impl QrDesign {
    pub fn has_logo(&self) -> bool {
        !self.logo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_indices_cycle_in_declaration_order() {
        assert_eq!(EcLevel::L.index(), 0);
        assert_eq!(EcLevel::H.index(), 3);
        assert_eq!(DotShape::Diamond.index(), 2);
    }

    #[test]
    fn serde_values_stay_lowercase() {
        for level in EcLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.value()));
        }
        for shape in DotShape::ALL {
            let json = serde_json::to_string(&shape).unwrap();
            assert_eq!(json, format!("\"{}\"", shape.value()));
        }
    }

    #[test]
    fn defaults_make_a_renderable_design() {
        let design = QrDesign::default();
        assert_eq!(design.data, "https://example.com");
        assert!(!design.has_logo());
        assert_eq!(design.ec_level, EcLevel::M);
    }
}
