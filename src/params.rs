//! Form metadata binding each design field to a control kind.
//!
//! The editor mounts its widgets from [`FORM`], and the loaders clamp numeric
//! fields through the same ranges, so both frontends agree on what a valid
//! design looks like.

use crate::design::QrDesign;

/// Numeric range and step for a slider-backed field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for NumberConfig {
    fn default() -> Self {
        Self { min: 0.0, max: 100.0, step: 1.0 }
    }
}

impl NumberConfig {
    /// Reconcile a raw value into the configured range. Whole-number fields
    /// (step of 1) round first. NaN passes through untouched so the caller
    /// can surface it instead of silently inventing a value.
    pub fn commit(&self, raw: f64) -> f64 {
        let rounded = if self.step == 1.0 { raw.round() } else { raw };
        rounded.clamp(self.min, self.max)
    }

    /// Parse a text buffer the way the number control commits it.
    /// Non-numeric input becomes NaN.
    pub fn commit_text(&self, text: &str) -> f64 {
        let parsed = text.trim().parse::<f64>().unwrap_or(f64::NAN);
        self.commit(parsed)
    }

    /// Nudge by a number of steps, staying in range. A NaN starting point
    /// restarts from the bottom of the range.
    pub fn step_by(&self, current: f64, steps: f64) -> f64 {
        let base = if current.is_finite() { current } else { self.min };
        self.commit(base + self.step * steps)
    }

    /// Position of a value inside the range, for drawing slider thumbs.
    pub fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Control kind attached to a design field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Number(NumberConfig),
    Text { placeholder: &'static str },
    Prompt { placeholder: &'static str },
    Color,
    Boolean,
    Select { options: &'static [(&'static str, &'static str)] },
    Image { button_label: &'static str },
}

/// Design field identifiers, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Data,
    ModuleSize,
    DotScale,
    QuietZone,
    Foreground,
    Background,
    Transparent,
    EcLevel,
    DotShape,
    ArtPrompt,
    Logo,
}

/// One entry in the design form.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub field: Field,
    pub label: &'static str,
    pub desc: &'static str,
    pub kind: ParamKind,
}

pub const MODULE_SIZE: NumberConfig = NumberConfig { min: 2.0, max: 40.0, step: 1.0 };
pub const DOT_SCALE: NumberConfig = NumberConfig { min: 0.3, max: 1.0, step: 0.05 };
pub const QUIET_ZONE: NumberConfig = NumberConfig { min: 0.0, max: 10.0, step: 1.0 };

/// `(value, label)` pairs shown by the error correction selector.
pub const EC_OPTIONS: &[(&str, &str)] = &[
    ("l", "Low (7%)"),
    ("m", "Medium (15%)"),
    ("q", "Quartile (25%)"),
    ("h", "High (30%)"),
];

/// `(value, label)` pairs shown by the dot shape selector.
pub const SHAPE_OPTIONS: &[(&str, &str)] = &[
    ("square", "Square"),
    ("round", "Round"),
    ("diamond", "Diamond"),
];

/// The design form, top to bottom.
pub const FORM: &[ParamSpec] = &[
    ParamSpec {
        field: Field::Data,
        label: "Data",
        desc: "Text or URL to encode",
        kind: ParamKind::Text { placeholder: "https://example.com" },
    },
    ParamSpec {
        field: Field::ModuleSize,
        label: "Module size",
        desc: "Pixels per module in raster output",
        kind: ParamKind::Number(MODULE_SIZE),
    },
    ParamSpec {
        field: Field::DotScale,
        label: "Dot scale",
        desc: "Dot size as a fraction of its module",
        kind: ParamKind::Number(DOT_SCALE),
    },
    ParamSpec {
        field: Field::QuietZone,
        label: "Quiet zone",
        desc: "Blank border width in modules",
        kind: ParamKind::Number(QUIET_ZONE),
    },
    ParamSpec {
        field: Field::Foreground,
        label: "Foreground",
        desc: "Module color",
        kind: ParamKind::Color,
    },
    ParamSpec {
        field: Field::Background,
        label: "Background",
        desc: "Canvas color",
        kind: ParamKind::Color,
    },
    ParamSpec {
        field: Field::Transparent,
        label: "Transparent",
        desc: "Leave the background unpainted",
        kind: ParamKind::Boolean,
    },
    ParamSpec {
        field: Field::EcLevel,
        label: "Error correction",
        desc: "Recoverable damage budget",
        kind: ParamKind::Select { options: EC_OPTIONS },
    },
    ParamSpec {
        field: Field::DotShape,
        label: "Dot shape",
        desc: "Geometry of each dark module",
        kind: ParamKind::Select { options: SHAPE_OPTIONS },
    },
    ParamSpec {
        field: Field::ArtPrompt,
        label: "Art prompt",
        desc: "Style prompt stored in the SVG description",
        kind: ParamKind::Prompt { placeholder: "e.g. watercolor koi pond at dusk" },
    },
    ParamSpec {
        field: Field::Logo,
        label: "Logo",
        desc: "Centre image embedded as a data URL",
        kind: ParamKind::Image { button_label: "Upload logo" },
    },
];

/// Look up a field's form entry.
pub fn spec(field: Field) -> &'static ParamSpec {
    FORM.iter().find(|s| s.field == field).unwrap_or(&FORM[0])
}

/// Numeric config for a field, with the catch-all 0..100 default for
/// fields that are not number-backed.
pub fn number_config(field: Field) -> NumberConfig {
    match spec(field).kind {
        ParamKind::Number(config) => config,
        _ => NumberConfig::default(),
    }
}

/// Clamp a design's numeric fields through the form ranges. Used after
/// loading from files or CLI flags, where values arrive unchecked.
pub fn sanitize(mut design: QrDesign) -> QrDesign {
    design.module_size = number_config(Field::ModuleSize).commit(design.module_size);
    design.dot_scale = number_config(Field::DotScale).commit(design.dot_scale);
    design.quiet_zone = number_config(Field::QuietZone).commit(design.quiet_zone);
    design
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn whole_step_commit_rounds_then_clamps() {
        assert_relative_eq!(MODULE_SIZE.commit_text("73.6"), 40.0);
        assert_relative_eq!(MODULE_SIZE.commit_text("7.4"), 7.0);
        assert_relative_eq!(MODULE_SIZE.commit_text("7.5"), 8.0);
        assert_relative_eq!(MODULE_SIZE.commit_text("1"), 2.0);
    }

    #[test]
    fn fractional_step_commit_keeps_precision() {
        assert_relative_eq!(DOT_SCALE.commit_text("0.725"), 0.725);
        assert_relative_eq!(DOT_SCALE.commit_text("0.1"), 0.3);
        assert_relative_eq!(DOT_SCALE.commit_text("2"), 1.0);
    }

    #[test]
    fn non_numeric_text_commits_nan() {
        assert!(MODULE_SIZE.commit_text("").is_nan());
        assert!(MODULE_SIZE.commit_text("12px").is_nan());
        assert!(DOT_SCALE.commit_text("big").is_nan());
    }

    #[test]
    fn stepping_recovers_from_nan() {
        assert_relative_eq!(QUIET_ZONE.step_by(f64::NAN, 1.0), 1.0);
        assert_relative_eq!(MODULE_SIZE.step_by(f64::NAN, -1.0), 2.0);
    }

    #[test]
    fn stepping_respects_bounds() {
        assert_relative_eq!(QUIET_ZONE.step_by(10.0, 1.0), 10.0);
        assert_relative_eq!(QUIET_ZONE.step_by(0.0, -1.0), 0.0);
        assert_relative_eq!(DOT_SCALE.step_by(0.85, 1.0), 0.9);
    }

    #[test]
    fn select_options_align_with_enum_order() {
        use crate::design::{DotShape, EcLevel};
        for (i, level) in EcLevel::ALL.iter().enumerate() {
            assert_eq!(EC_OPTIONS[i].0, level.value());
            assert_eq!(EC_OPTIONS[i].1, level.label());
        }
        for (i, shape) in DotShape::ALL.iter().enumerate() {
            assert_eq!(SHAPE_OPTIONS[i].0, shape.value());
            assert_eq!(SHAPE_OPTIONS[i].1, shape.label());
        }
    }

    #[test]
    fn form_covers_every_field_once() {
        let fields: Vec<Field> = FORM.iter().map(|s| s.field).collect();
        assert_eq!(fields.len(), 11);
        for (i, field) in fields.iter().enumerate() {
            assert!(!fields[i + 1..].contains(field));
        }
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let mut design = QrDesign::default();
        design.module_size = 400.0;
        design.dot_scale = 0.01;
        design.quiet_zone = -3.0;
        let design = sanitize(design);
        assert_relative_eq!(design.module_size, 40.0);
        assert_relative_eq!(design.dot_scale, 0.3);
        assert_relative_eq!(design.quiet_zone, 0.0);
    }

    #[test]
    fn fallback_config_matches_the_generic_slider() {
        let config = number_config(Field::Data);
        assert_relative_eq!(config.min, 0.0);
        assert_relative_eq!(config.max, 100.0);
        assert_relative_eq!(config.step, 1.0);
    }
}
