//! Color parsing and HSVA conversions shared by the renderer and the picker.

use csscolorparser::Color as CssColor;
use palette::{FromColor, Hsv, Srgb};

/// HSV color with alpha. Hue is in degrees (0-360), the other channels in 0-1.
///
/// The all-zero value doubles as the fallback for unparseable input, so the
/// picker always has a well-defined starting point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hsva {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub a: f32,
}

/// Parse any CSS color string into `Srgb<u8>`.
///
/// Supports: hex (#RRGGBB), rgb(), hsl(), named colors, etc.
pub fn parse_color(input: &str) -> Result<Srgb<u8>, String> {
    let css_color: CssColor = input
        .parse()
        .map_err(|e| format!("Invalid color '{}': {}", input, e))?;
    let [r, g, b, _a] = css_color.to_rgba8();
    Ok(Srgb::new(r, g, b))
}

/// Parse a color for rendering, falling back when the text is mid-edit garbage.
pub fn parse_or(input: &str, fallback: Srgb<u8>) -> Srgb<u8> {
    parse_color(input).unwrap_or(fallback)
}

/// Parse any CSS color string into HSVA.
pub fn hex_to_hsva(input: &str) -> Result<Hsva, String> {
    let css_color: CssColor = input
        .parse()
        .map_err(|e| format!("Invalid color '{}': {}", input, e))?;
    let [r, g, b, a] = css_color.to_array();
    let hsv = Hsv::from_color(Srgb::new(r, g, b));
    Ok(Hsva {
        h: hsv.hue.into_positive_degrees(),
        s: hsv.saturation,
        v: hsv.value,
        a,
    })
}

/// Parse for the picker. Invalid input yields the zero color rather than
/// carrying stale channels over from the previous selection.
pub fn hsva_or_default(input: &str) -> Hsva {
    hex_to_hsva(input).unwrap_or_default()
}

/// Format HSVA as a lowercase 6-digit hex string. Alpha is not encoded.
pub fn hsva_to_hex(color: Hsva) -> String {
    let rgb = Srgb::from_color(Hsv::new(color.h, color.s, color.v)).into_format::<u8>();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Convert a parsed color to the terminal's RGB space.
pub fn to_tui(color: Srgb<u8>) -> ratatui::style::Color {
    ratatui::style::Color::Rgb(color.red, color.green, color.blue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_hex_colors() {
        let color = parse_color("#1a1a2e").unwrap();
        assert_eq!((color.red, color.green, color.blue), (26, 26, 46));
    }

    #[test]
    fn parses_named_and_functional_colors() {
        assert_eq!(parse_color("white").unwrap(), Srgb::new(255, 255, 255));
        assert_eq!(parse_color("rgb(0, 128, 0)").unwrap(), Srgb::new(0, 128, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_color("#zzz").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn parse_or_falls_back() {
        let fallback = Srgb::new(0u8, 0, 0);
        assert_eq!(parse_or("#12", fallback), fallback);
        assert_eq!(parse_or("#ff0000", fallback), Srgb::new(255, 0, 0));
    }

    #[test]
    fn pure_red_round_trips_through_hsva() {
        let hsva = hex_to_hsva("#ff0000").unwrap();
        assert_relative_eq!(hsva.h, 0.0, epsilon = 1e-4);
        assert_relative_eq!(hsva.s, 1.0, epsilon = 1e-4);
        assert_relative_eq!(hsva.v, 1.0, epsilon = 1e-4);
        assert_relative_eq!(hsva.a, 1.0, epsilon = 1e-4);
        assert_eq!(hsva_to_hex(hsva), "#ff0000");
    }

    #[test]
    fn full_hue_maps_to_green() {
        let hsva = Hsva { h: 120.0, s: 1.0, v: 1.0, a: 1.0 };
        assert_eq!(hsva_to_hex(hsva), "#00ff00");
    }

    #[test]
    fn hex_output_is_lowercase_and_drops_alpha() {
        let hsva = hex_to_hsva("#ABCDEF80").unwrap();
        assert_relative_eq!(hsva.a, 0.5, epsilon = 0.01);
        assert_eq!(hsva_to_hex(hsva), "#abcdef");
    }

    #[test]
    fn invalid_input_yields_zero_hsva() {
        assert_eq!(hsva_or_default("not a color"), Hsva::default());
        assert_eq!(hsva_or_default(""), Hsva::default());
    }

    #[test]
    fn grey_keeps_value_without_saturation() {
        let hsva = hex_to_hsva("#808080").unwrap();
        assert_relative_eq!(hsva.s, 0.0, epsilon = 1e-4);
        assert_relative_eq!(hsva.v, 0.502, epsilon = 1e-3);
    }
}
