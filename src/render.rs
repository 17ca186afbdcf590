//! SVG and PNG emitters for a built symbol.
//!
//! Both emitters take the design at face value but never let a half-edited
//! field produce broken output: unparseable colors fall back to plain
//! black-on-white and non-finite numbers fall back to their defaults.

use std::fmt::Write as _;
use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use palette::Srgb;

use crate::color;
use crate::design::{DotShape, QrDesign};
use crate::media::{self, MediaError};
use crate::qr::QrOutcome;

/// Fraction of the symbol's side covered by the logo box.
const LOGO_FRACTION: f64 = 0.22;

#[derive(Debug)]
pub enum RenderError {
    Logo(MediaError),
    Encode(image::ImageError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Logo(e) => write!(f, "logo compositing failed: {e}"),
            RenderError::Encode(e) => write!(f, "PNG encoding failed: {e}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<MediaError> for RenderError {
    fn from(err: MediaError) -> Self {
        RenderError::Logo(err)
    }
}

/// Resolve the design's color strings for rendering. Mid-edit garbage falls
/// back to black on white so the preview never goes blank under the cursor.
pub fn resolved_colors(design: &QrDesign) -> (Srgb<u8>, Srgb<u8>) {
    let fg = color::parse_or(&design.foreground, Srgb::new(0, 0, 0));
    let bg = color::parse_or(&design.background, Srgb::new(255, 255, 255));
    (fg, bg)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Shortest decimal form with at most 3 fractional digits.
fn num(value: f64) -> String {
    let mut s = format!("{value:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('"', "&quot;")
}

/// Emit the symbol as an SVG document. One module is one user unit; the
/// quiet zone widens the viewBox around it.
pub fn svg(design: &QrDesign, outcome: &QrOutcome) -> String {
    let quiet = finite_or(design.quiet_zone, 0.0).max(0.0);
    let scale = finite_or(design.dot_scale, 1.0).clamp(0.05, 1.0);
    let half = scale / 2.0;
    let size = outcome.width as f64 + 2.0 * quiet;
    let (fg, bg) = resolved_colors(design);
    let fg = hex(fg);
    let bg = hex(bg);

    let mut out = String::with_capacity(outcome.dark_count * 56 + 512);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}">"#
    );
    if !design.art_prompt.is_empty() {
        let _ = writeln!(out, "  <desc>{}</desc>", escape_text(&design.art_prompt));
    }
    if !design.transparent {
        let _ = writeln!(out, r#"  <rect width="{size}" height="{size}" fill="{bg}"/>"#);
    }
    for y in 0..outcome.width {
        for x in 0..outcome.width {
            if !outcome.is_dark(x, y) {
                continue;
            }
            let cx = quiet + x as f64 + 0.5;
            let cy = quiet + y as f64 + 0.5;
            let _ = match design.dot_shape {
                DotShape::Square => writeln!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{fg}"/>"#,
                    num(cx - half),
                    num(cy - half),
                    num(scale),
                    num(scale)
                ),
                DotShape::Round => writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{fg}"/>"#,
                    num(cx),
                    num(cy),
                    num(half)
                ),
                DotShape::Diamond => writeln!(
                    out,
                    r#"  <path d="M{} {}L{} {}L{} {}L{} {}Z" fill="{fg}"/>"#,
                    num(cx),
                    num(cy - half),
                    num(cx + half),
                    num(cy),
                    num(cx),
                    num(cy + half),
                    num(cx - half),
                    num(cy)
                ),
            };
        }
    }
    if design.has_logo() {
        let box_size = size * LOGO_FRACTION;
        let origin = (size - box_size) / 2.0;
        let pad = box_size * 0.1;
        if !design.transparent {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{bg}"/>"#,
                num(origin - pad),
                num(origin - pad),
                num(box_size + 2.0 * pad),
                num(box_size + 2.0 * pad)
            );
        }
        let _ = writeln!(
            out,
            r#"  <image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" href="{}"/>"#,
            num(origin),
            num(origin),
            num(box_size),
            num(box_size),
            escape_attr(&design.logo)
        );
    }
    out.push_str("</svg>\n");
    out
}

/// Whether a point inside a module cell is covered by the dot. `u` and `v`
/// are offsets from the cell centre in `[-0.5, 0.5]`.
fn covered(shape: DotShape, scale: f64, u: f64, v: f64) -> bool {
    let half = scale / 2.0;
    match shape {
        DotShape::Square => u.abs() <= half && v.abs() <= half,
        DotShape::Round => u * u + v * v <= half * half,
        DotShape::Diamond => u.abs() + v.abs() <= half,
    }
}

/// Rasterize the symbol at `module_size` pixels per module.
pub fn png(design: &QrDesign, outcome: &QrOutcome) -> Result<RgbaImage, RenderError> {
    let module_px = finite_or(design.module_size, 8.0).round().max(1.0) as u32;
    let quiet = finite_or(design.quiet_zone, 0.0).max(0.0);
    let scale = finite_or(design.dot_scale, 1.0).clamp(0.05, 1.0);
    let quiet_px = (quiet * f64::from(module_px)).round() as u32;
    let side = outcome.width as u32 * module_px + 2 * quiet_px;
    let (fg, bg) = resolved_colors(design);
    let fg = Rgba([fg.red, fg.green, fg.blue, 255]);
    let bg_alpha = if design.transparent { 0 } else { 255 };
    let bg = Rgba([bg.red, bg.green, bg.blue, bg_alpha]);

    let mut img = RgbaImage::from_pixel(side, side, bg);
    for y in 0..outcome.width {
        for x in 0..outcome.width {
            if !outcome.is_dark(x, y) {
                continue;
            }
            let x0 = quiet_px + x as u32 * module_px;
            let y0 = quiet_px + y as u32 * module_px;
            for py in 0..module_px {
                for px in 0..module_px {
                    let u = (f64::from(px) + 0.5) / f64::from(module_px) - 0.5;
                    let v = (f64::from(py) + 0.5) / f64::from(module_px) - 0.5;
                    if covered(design.dot_shape, scale, u, v) {
                        img.put_pixel(x0 + px, y0 + py, fg);
                    }
                }
            }
        }
    }
    if design.has_logo() {
        composite_logo(&mut img, design)?;
    }
    Ok(img)
}

/// PNG-encode the rasterized symbol.
pub fn png_bytes(design: &QrDesign, outcome: &QrOutcome) -> Result<Vec<u8>, RenderError> {
    let img = png(design, outcome)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(RenderError::Encode)?;
    Ok(bytes)
}

fn composite_logo(img: &mut RgbaImage, design: &QrDesign) -> Result<(), RenderError> {
    let bytes = media::decode_data_url(&design.logo)?;
    let logo = image::load_from_memory(&bytes).map_err(|e| RenderError::Logo(MediaError::Decode(e)))?;
    let side = img.width();
    let box_px = (f64::from(side) * LOGO_FRACTION).round().max(1.0) as u32;
    let resized = imageops::resize(&logo.to_rgba8(), box_px, box_px, FilterType::Lanczos3);
    let origin = (side - box_px.min(side)) / 2;
    if !design.transparent {
        // backing square keeps the logo legible over dense modules
        let (_, bg) = resolved_colors(design);
        let backing = Rgba([bg.red, bg.green, bg.blue, 255]);
        let pad = (box_px / 10).max(1);
        for y in origin.saturating_sub(pad)..(origin + box_px + pad).min(side) {
            for x in origin.saturating_sub(pad)..(origin + box_px + pad).min(side) {
                img.put_pixel(x, y, backing);
            }
        }
    }
    imageops::overlay(img, &resized, i64::from(origin), i64::from(origin));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_coverage_matches_each_shape() {
        assert!(covered(DotShape::Square, 1.0, 0.45, 0.45));
        assert!(!covered(DotShape::Diamond, 1.0, 0.45, 0.45));
        assert!(covered(DotShape::Diamond, 1.0, 0.0, 0.45));
        assert!(!covered(DotShape::Round, 1.0, 0.48, 0.48));
        assert!(covered(DotShape::Round, 1.0, 0.0, 0.0));
        assert!(!covered(DotShape::Square, 0.5, 0.3, 0.0));
    }
}
