//! Syntax highlighting engine using syntect, themed from the design's colors.

use std::str::FromStr;
use std::sync::LazyLock;

use palette::Srgb;
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSettings,
};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use syntect_tui::into_span;

/// Cached syntax set - expensive to load, so we cache it globally.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Syntax highlighter themed with the design's own foreground and background,
/// so the source view reads like the symbol it describes.
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    pub fn new(foreground: Srgb<u8>, background: Srgb<u8>) -> Self {
        Self {
            theme: build_theme(foreground, background),
        }
    }

    /// Get the background color as ratatui Color.
    pub fn background_color(&self) -> ratatui::style::Color {
        self.theme
            .settings
            .background
            .map(|c| ratatui::style::Color::Rgb(c.r, c.g, c.b))
            .unwrap_or(ratatui::style::Color::Reset)
    }

    /// Highlight code and return ratatui Lines.
    pub fn highlight(&self, code: &str, extension: &str) -> Vec<Line<'static>> {
        let syntax = SYNTAX_SET
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        // Use LinesWithEndings to preserve newlines for proper syntax state tracking.
        LinesWithEndings::from(code)
            .map(|line| {
                let ranges = highlighter
                    .highlight_line(line, &SYNTAX_SET)
                    .unwrap_or_default();
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|seg| {
                        into_span(seg).ok().map(|span| {
                            // Strip trailing newline and convert to owned span
                            let content = span.content.trim_end_matches('\n').to_string();
                            // Remove background from style so spans inherit widget background.
                            // into_span sets explicit backgrounds which cause visual artifacts
                            // on whitespace characters (tabs appearing as grey blocks).
                            let mut patched = ratatui::style::Style::new();
                            if let Some(fg) = span.style.fg {
                                patched = patched.fg(fg);
                            }
                            if span
                                .style
                                .add_modifier
                                .contains(ratatui::style::Modifier::BOLD)
                            {
                                patched = patched.add_modifier(ratatui::style::Modifier::BOLD);
                            }
                            if span
                                .style
                                .add_modifier
                                .contains(ratatui::style::Modifier::ITALIC)
                            {
                                patched = patched.add_modifier(ratatui::style::Modifier::ITALIC);
                            }
                            if span
                                .style
                                .add_modifier
                                .contains(ratatui::style::Modifier::UNDERLINED)
                            {
                                patched =
                                    patched.add_modifier(ratatui::style::Modifier::UNDERLINED);
                            }
                            Span::styled(content, patched)
                        })
                    })
                    // Filter out empty spans that may result from stripped newlines
                    .filter(|span| !span.content.is_empty())
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Linear blend from `a` toward `b`.
fn mix(a: Srgb<u8>, b: Srgb<u8>, t: f32) -> Color {
    let lerp = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8
    };
    Color {
        r: lerp(a.red, b.red),
        g: lerp(a.green, b.green),
        b: lerp(a.blue, b.blue),
        a: 255,
    }
}

/// Build a two-color syntect Theme by blending the design's foreground
/// toward its background for the secondary tones.
fn build_theme(fg: Srgb<u8>, bg: Srgb<u8>) -> Theme {
    let to_color = |c: Srgb<u8>| Color { r: c.red, g: c.green, b: c.blue, a: 255 };
    let full = to_color(fg);
    let strong = mix(fg, bg, 0.15);
    let mid = mix(fg, bg, 0.35);
    let muted = mix(fg, bg, 0.55);
    let faint = mix(fg, bg, 0.7);

    let settings = ThemeSettings {
        foreground: Some(full),
        background: Some(to_color(bg)),
        caret: Some(full),
        selection: Some(mix(fg, bg, 0.8)),
        line_highlight: Some(mix(fg, bg, 0.92)),
        gutter: Some(mix(fg, bg, 0.95)),
        gutter_foreground: Some(muted),
        ..Default::default()
    };

    // Helper to create a foreground-only ThemeItem
    let rule = |scope: &str, color: Color, font_style: Option<FontStyle>| -> ThemeItem {
        ThemeItem {
            scope: ScopeSelectors::from_str(scope).unwrap_or_default(),
            style: StyleModifier {
                foreground: Some(color),
                background: None,
                font_style,
            },
        }
    };

    // XML is all the source view shows, so the rules focus on its scopes.
    let scopes = vec![
        rule(
            "comment, punctuation.definition.comment",
            muted,
            Some(FontStyle::ITALIC),
        ),
        rule("punctuation, meta.tag.preprocessor", faint, None),
        rule("entity.name.tag", full, Some(FontStyle::BOLD)),
        rule("entity.other.attribute-name", mid, None),
        rule(
            "string, string.quoted.double, punctuation.definition.string",
            strong,
            None,
        ),
        rule("constant.numeric, constant.character.escape", mid, None),
        rule("invalid, invalid.illegal", full, Some(FontStyle::UNDERLINE)),
    ];

    Theme {
        name: Some(String::from("qrforge design")),
        author: None,
        settings,
        scopes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints_return_the_inputs() {
        let a = Srgb::new(10u8, 20, 30);
        let b = Srgb::new(250u8, 240, 230);
        let zero = mix(a, b, 0.0);
        assert_eq!((zero.r, zero.g, zero.b), (10, 20, 30));
        let one = mix(a, b, 1.0);
        assert_eq!((one.r, one.g, one.b), (250, 240, 230));
    }

    #[test]
    fn highlighter_reports_the_design_background() {
        let hl = Highlighter::new(Srgb::new(0u8, 0, 0), Srgb::new(18u8, 52, 86));
        assert_eq!(
            hl.background_color(),
            ratatui::style::Color::Rgb(18, 52, 86)
        );
    }

    #[test]
    fn xml_input_produces_one_line_per_source_line() {
        let hl = Highlighter::new(Srgb::new(20u8, 20, 40), Srgb::new(255u8, 255, 255));
        let lines = hl.highlight("<svg>\n  <rect/>\n</svg>\n", "xml");
        assert_eq!(lines.len(), 3);
    }
}
