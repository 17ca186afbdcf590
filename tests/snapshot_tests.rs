//! Snapshot tests for the design surface.
//!
//! Uses insta to pin the crate's stable text outputs: the serialized default
//! design, the form metadata, and the SVG emitted for a hand-built matrix.
//! Assumes current output shapes are correct - these tests detect regressions.

use qrforge::design::QrDesign;
use qrforge::params::{self, ParamKind};
use qrforge::qr::QrOutcome;
use qrforge::render;

// ============================================================================
// Design serialization
// ============================================================================

#[test]
fn snapshot_default_design_toml() {
    let toml = toml::to_string_pretty(&QrDesign::default()).unwrap();
    insta::assert_snapshot!("default_design_toml", toml.trim_end());
}

// ============================================================================
// Form metadata
// ============================================================================

fn describe(kind: &ParamKind) -> String {
    match kind {
        ParamKind::Number(c) => format!("number {}..{} step {}", c.min, c.max, c.step),
        ParamKind::Text { placeholder } => format!("text (placeholder \"{placeholder}\")"),
        ParamKind::Prompt { placeholder } => format!("prompt (placeholder \"{placeholder}\")"),
        ParamKind::Color => "color".to_string(),
        ParamKind::Boolean => "boolean".to_string(),
        ParamKind::Select { options } => {
            let values: Vec<&str> = options.iter().map(|(value, _)| *value).collect();
            format!("select [{}]", values.join("|"))
        }
        ParamKind::Image { button_label } => format!("image (button \"{button_label}\")"),
    }
}

#[test]
fn snapshot_design_form() {
    let rows: Vec<String> = params::FORM
        .iter()
        .map(|spec| format!("{:<16} | {} | {}", spec.label, describe(&spec.kind), spec.desc))
        .collect();
    insta::assert_snapshot!("design_form", rows.join("\n"));
}

// ============================================================================
// SVG emission for a known matrix
// ============================================================================

/// A 2x2 checkerboard: dark at (0,0) and (1,1).
fn checker_outcome() -> QrOutcome {
    QrOutcome {
        modules: vec![true, false, false, true],
        width: 2,
        version: "1".to_string(),
        dark_count: 2,
    }
}

#[test]
fn snapshot_svg_document() {
    let mut design = QrDesign::default();
    design.quiet_zone = 1.0;
    design.dot_scale = 1.0;
    design.art_prompt = String::from("koi pond at dusk");

    let svg = render::svg(&design, &checker_outcome());
    insta::assert_snapshot!("svg_document", svg.trim_end());
}
