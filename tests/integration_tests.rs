use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd() -> Command {
    cargo_bin_cmd!("qrforge")
}

#[test]
fn test_cli_emits_svg_to_stdout() {
    cmd()
        .args(["--data", "https://qrforge.dev"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg xmlns="))
        .stdout(predicate::str::contains("viewBox="))
        .stdout(predicate::str::contains("</svg>"));
}

#[test]
fn test_cli_short_payload_encodes_version_one() {
    // "hello" fits in a version 1 symbol: 21 modules plus the default
    // 2-module quiet zone on each side
    cmd()
        .args(["-d", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"viewBox="0 0 25 25""#));
}

#[test]
fn test_cli_round_shape_emits_circles() {
    cmd()
        .args(["-d", "hello", "--dot-shape", "round"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<circle"))
        .stdout(predicate::str::contains("<rect")); // background rect stays
}

#[test]
fn test_cli_transparent_diamond_has_no_rects() {
    cmd()
        .args(["-d", "hello", "--dot-shape", "diamond", "--transparent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<path"))
        .stdout(predicate::str::contains("<rect").not());
}

#[test]
fn test_cli_prompt_lands_in_the_svg_description() {
    cmd()
        .args(["-d", "hello", "--prompt", "koi pond & dusk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<desc>koi pond &amp; dusk</desc>"));
}

#[test]
fn test_cli_invalid_color_fails_at_parse() {
    cmd()
        .args(["-d", "hello", "--foreground", "#12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_named_css_color_is_accepted() {
    cmd()
        .args(["-d", "hello", "--foreground", "rebeccapurple"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r##"fill="#663399""##));
}

#[test]
fn test_cli_data_required_without_interactive_or_config() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_cli_png_requires_output_path() {
    cmd()
        .args(["-d", "hello", "--format", "png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PNG output requires --output"));
}

#[test]
fn test_cli_png_extension_selects_raster_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("code.png");

    cmd()
        .args(["-d", "hello", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote PNG"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_cli_svg_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("code.svg");

    cmd()
        .args(["-d", "hello", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote SVG"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("<svg xmlns="));
    assert!(content.ends_with("</svg>\n"));
}

#[test]
fn test_cli_design_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let design_file = dir.path().join("design.toml");

    cmd()
        .args(["-d", "saved data", "--ec-level", "h", "--dot-shape", "round", "--save-config"])
        .arg(&design_file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote design"));

    // The reloaded file supplies the data, so -d is not needed
    cmd()
        .arg("--config")
        .arg(&design_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("<circle"));
}

#[test]
fn test_cli_flags_override_the_design_file() {
    let dir = tempfile::tempdir().unwrap();
    let design_file = dir.path().join("design.toml");
    std::fs::write(&design_file, "data = \"hello\"\nforeground = \"#111111\"\n").unwrap();

    cmd()
        .arg("--config")
        .arg(&design_file)
        .args(["--foreground", "#aa55cc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r##"fill="#aa55cc""##));
}

#[test]
fn test_cli_missing_design_file_fails() {
    cmd()
        .args(["--config", "/no/such/design.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("design file not found"));
}

#[test]
fn test_cli_logo_is_embedded_as_data_url() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("logo.png");
    image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 200, 30, 255]))
        .save(&logo)
        .unwrap();

    cmd()
        .args(["-d", "hello", "--logo"])
        .arg(&logo)
        .assert()
        .success()
        .stdout(predicate::str::contains("data:image/jpeg;base64,"));
}

#[test]
fn test_cli_unreadable_logo_fails() {
    cmd()
        .args(["-d", "hello", "--logo", "/no/such/logo.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot embed logo"));
}

#[test]
fn test_cli_completions_print_without_other_args() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qrforge"));
}
