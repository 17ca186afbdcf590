//! Design-file load, save, and layered-resolution tests.

use std::path::Path;

use qrforge::config::{ConfigError, load, resolve, save};
use qrforge::design::{DotShape, EcLevel, QrDesign};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_size: Option<f64>,
}

fn write_design_file(content: &str) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::fs::write(file.path(), content).unwrap();
    file
}

#[test]
fn round_trips_through_toml() {
    let mut design = QrDesign::default();
    design.data = String::from("https://qrforge.dev");
    design.ec_level = EcLevel::H;
    design.dot_shape = DotShape::Round;
    design.transparent = true;

    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    save(&design, file.path()).unwrap();
    let loaded = load(file.path()).unwrap();
    assert_eq!(loaded, design);
}

#[test]
fn partial_files_fill_in_defaults() {
    let file = write_design_file("data = \"hello\"\nec_level = \"q\"\n");
    let design = load(file.path()).unwrap();
    assert_eq!(design.data, "hello");
    assert_eq!(design.ec_level, EcLevel::Q);
    assert_eq!(design.background, "#ffffff");
}

#[test]
fn loading_clamps_out_of_range_numbers() {
    let file = write_design_file("module_size = 900\ndot_scale = 0.01\n");
    let design = load(file.path()).unwrap();
    assert_eq!(design.module_size, 40.0);
    assert_eq!(design.dot_scale, 0.3);
}

#[test]
fn cli_overrides_beat_the_file() {
    let file = write_design_file("foreground = \"#111111\"\nmodule_size = 4\n");
    let overrides = Overrides {
        foreground: Some(String::from("#222222")),
        module_size: None,
    };
    let design = resolve(Some(file.path()), &overrides).unwrap();
    assert_eq!(design.foreground, "#222222");
    assert_eq!(design.module_size, 4.0);
}

#[test]
fn unset_overrides_leave_defaults_alone() {
    let design = resolve(None, &Overrides::default()).unwrap();
    assert_eq!(design, QrDesign::default());
}

#[test]
fn missing_design_file_is_an_io_error() {
    let err = resolve(Some(Path::new("/no/such/design.toml")), &Overrides::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_design_file("data = [unclosed\n");
    assert!(matches!(load(file.path()), Err(ConfigError::Parse(_))));
}
