//! SVG and PNG emitter edge cases over built symbols.

use image::{Rgba, RgbaImage};
use qrforge::design::{DotShape, QrDesign};
use qrforge::media;
use qrforge::qr::{self, QrOutcome};
use qrforge::render::{RenderError, png, png_bytes, svg};

fn built(design: &QrDesign) -> QrOutcome {
    qr::build(design).unwrap()
}

#[test]
fn svg_viewbox_covers_symbol_plus_quiet_zone() {
    let design = QrDesign::default();
    let outcome = built(&design);
    let expected = outcome.width as f64 + 2.0 * design.quiet_zone;
    let svg = svg(&design, &outcome);
    assert!(svg.contains(&format!(r#"viewBox="0 0 {expected} {expected}""#)));
}

#[test]
fn square_design_draws_one_rect_per_dark_module_plus_background() {
    let design = QrDesign::default();
    let outcome = built(&design);
    let svg = svg(&design, &outcome);
    let rects = svg.matches("<rect").count();
    assert_eq!(rects, outcome.dark_count + 1);
}

#[test]
fn round_shape_emits_circles() {
    let mut design = QrDesign::default();
    design.dot_shape = DotShape::Round;
    let outcome = built(&design);
    let svg = svg(&design, &outcome);
    assert_eq!(svg.matches("<circle").count(), outcome.dark_count);
}

#[test]
fn transparent_design_omits_the_background_rect() {
    let mut design = QrDesign::default();
    design.dot_shape = DotShape::Diamond;
    design.transparent = true;
    let outcome = built(&design);
    let svg = svg(&design, &outcome);
    assert!(!svg.contains("<rect"));
    assert_eq!(svg.matches("<path").count(), outcome.dark_count);
}

#[test]
fn art_prompt_lands_escaped_in_the_description() {
    let mut design = QrDesign::default();
    design.art_prompt = String::from("koi <pond> & dusk");
    let outcome = built(&design);
    let svg = svg(&design, &outcome);
    assert!(svg.contains("<desc>koi &lt;pond&gt; &amp; dusk</desc>"));
}

#[test]
fn empty_prompt_adds_no_description() {
    let design = QrDesign::default();
    let outcome = built(&design);
    assert!(!svg(&design, &outcome).contains("<desc>"));
}

#[test]
fn unparseable_colors_fall_back_to_black_on_white() {
    let mut design = QrDesign::default();
    design.foreground = String::from("#1a1a2");
    design.background = String::from("nope");
    let outcome = built(&design);
    let svg = svg(&design, &outcome);
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(svg.contains(r##"fill="#ffffff""##));
}

#[test]
fn non_finite_numbers_never_reach_the_svg() {
    let mut design = QrDesign::default();
    design.dot_scale = f64::NAN;
    design.quiet_zone = f64::NAN;
    let outcome = built(&design);
    assert!(!svg(&design, &outcome).contains("NaN"));
}

#[test]
fn png_side_length_matches_the_geometry() {
    let design = QrDesign::default();
    let outcome = built(&design);
    let img = png(&design, &outcome).unwrap();
    let quiet_px = (design.quiet_zone * design.module_size) as u32;
    let expected = outcome.width as u32 * design.module_size as u32 + 2 * quiet_px;
    assert_eq!(img.width(), expected);
    assert_eq!(img.height(), expected);
}

#[test]
fn png_quiet_zone_corner_uses_the_background() {
    let mut design = QrDesign::default();
    design.background = String::from("#3366cc");
    let outcome = built(&design);
    let img = png(&design, &outcome).unwrap();
    assert_eq!(img.get_pixel(0, 0), &Rgba([0x33, 0x66, 0xcc, 255]));
}

#[test]
fn transparent_png_has_clear_background() {
    let mut design = QrDesign::default();
    design.transparent = true;
    let outcome = built(&design);
    let img = png(&design, &outcome).unwrap();
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn finder_centre_pixel_is_foreground() {
    let mut design = QrDesign::default();
    design.foreground = String::from("#102030");
    let outcome = built(&design);
    let img = png(&design, &outcome).unwrap();
    let module_px = design.module_size as u32;
    let quiet_px = (design.quiet_zone * design.module_size) as u32;
    // centre of module (3, 3), the middle of the top-left finder pattern
    let p = quiet_px + 3 * module_px + module_px / 2;
    assert_eq!(img.get_pixel(p, p), &Rgba([0x10, 0x20, 0x30, 255]));
}

#[test]
fn nan_module_size_still_rasterizes() {
    let mut design = QrDesign::default();
    design.module_size = f64::NAN;
    let outcome = built(&design);
    let img = png(&design, &outcome).unwrap();
    assert!(img.width() > 0);
}

#[test]
fn png_bytes_start_with_the_png_signature() {
    let design = QrDesign::default();
    let outcome = built(&design);
    let bytes = png_bytes(&design, &outcome).unwrap();
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
}

#[test]
fn logo_data_url_is_embedded_in_svg() {
    let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 255]))
        .save(file.path())
        .unwrap();
    let mut design = QrDesign::default();
    design.logo = media::to_data_url(file.path(), 1.0).unwrap();
    let outcome = built(&design);
    let svg = svg(&design, &outcome);
    assert!(svg.contains("<image "));
    assert!(svg.contains("data:image/jpeg;base64,"));
}

#[test]
fn logo_overlay_recolors_the_centre_of_the_png() {
    let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 255]))
        .save(file.path())
        .unwrap();
    let mut design = QrDesign::default();
    design.logo = media::to_data_url(file.path(), 1.0).unwrap();
    let outcome = built(&design);
    let img = png(&design, &outcome).unwrap();
    let centre = img.width() / 2;
    let pixel = img.get_pixel(centre, centre).0;
    // JPEG round-trip wobbles the exact channel values
    assert!(pixel[1] > 150 && pixel[0] < 80 && pixel[2] < 80);
}

#[test]
fn corrupt_logo_reports_instead_of_panicking() {
    let mut design = QrDesign::default();
    design.logo = String::from("data:image/jpeg;base64,AAAA");
    let outcome = built(&design);
    assert!(matches!(png(&design, &outcome), Err(RenderError::Logo(_))));
}
