//! CLI argument parsing and command handling.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use serde::Serialize;

use crate::design::{DotShape, EcLevel};

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pick from the output file extension (SVG when writing to stdout)
    #[default]
    Auto,
    /// Vector output
    Svg,
    /// Raster output at module-size pixels per module
    Png,
}

/// CLI-compatible error correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EcLevelArg {
    /// Low, ~7% recoverable
    L,
    /// Medium, ~15% recoverable
    #[default]
    M,
    /// Quartile, ~25% recoverable
    Q,
    /// High, ~30% recoverable
    H,
}

impl From<EcLevelArg> for EcLevel {
    fn from(arg: EcLevelArg) -> Self {
        match arg {
            EcLevelArg::L => EcLevel::L,
            EcLevelArg::M => EcLevel::M,
            EcLevelArg::Q => EcLevel::Q,
            EcLevelArg::H => EcLevel::H,
        }
    }
}

/// CLI-compatible dot shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DotShapeArg {
    #[default]
    Square,
    Round,
    Diamond,
}

impl From<DotShapeArg> for DotShape {
    fn from(arg: DotShapeArg) -> Self {
        match arg {
            DotShapeArg::Square => DotShape::Square,
            DotShapeArg::Round => DotShape::Round,
            DotShapeArg::Diamond => DotShape::Diamond,
        }
    }
}

/// Parametric QR code designer with live terminal preview and SVG/PNG export.
#[derive(Parser, Debug, Serialize)]
#[command(name = "qrforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data to encode (text or URL)
    #[arg(
        short,
        long,
        default_value_if("interactive", "true", "https://example.com"),
        required_unless_present_any = ["interactive", "config", "completions"]
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Pixels per module in raster output (2-40)
    #[arg(long, value_name = "PX")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_size: Option<f64>,

    /// Dot size as a fraction of its module (0.3-1.0)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_scale: Option<f64>,

    /// Quiet zone width in modules (0-10)
    #[arg(long, value_name = "MODULES")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_zone: Option<f64>,

    /// Module color in any CSS format (hex, rgb(), hsl(), named)
    #[arg(
        short,
        long,
        value_parser = |s: &str| s.parse::<csscolorparser::Color>().map(|_| s.to_string()).map_err(|e| e.to_string())
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,

    /// Canvas color in any CSS format (hex, rgb(), hsl(), named)
    #[arg(
        short,
        long,
        value_parser = |s: &str| s.parse::<csscolorparser::Color>().map(|_| s.to_string()).map_err(|e| e.to_string())
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Leave the background unpainted
    #[arg(long, action = clap::ArgAction::Set, num_args = 0, default_missing_value = "true")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,

    /// Error correction level
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ec_level: Option<EcLevelArg>,

    /// Geometry drawn for each dark module
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_shape: Option<DotShapeArg>,

    /// Art direction prompt embedded in the SVG description
    #[arg(long)]
    #[serde(rename = "art_prompt", skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Logo image file embedded in the symbol centre
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub logo: Option<PathBuf>,

    /// Output file (stdout if not specified; extension selects the format)
    #[arg(short, long)]
    #[serde(skip)]
    pub output: Option<PathBuf>,

    /// Output format: auto (from extension), svg, or png
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    #[serde(skip)]
    pub format: FormatArg,

    /// Load design from TOML file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Save the resolved design to a TOML file
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub save_config: Option<PathBuf>,

    /// Launch the interactive TUI editor
    #[arg(short, long)]
    #[serde(skip)]
    pub interactive: bool,

    /// Log file path (default: qrforge.log)
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    #[serde(skip)]
    pub log_level: String,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    #[serde(skip)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Write completions for the given shell to stdout.
    pub fn print_completions(shell: clap_complete::Shell) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_serialize_to_nothing() {
        let cli = Cli::parse_from(["qrforge", "--interactive"]);
        let json = serde_json::to_value(&cli).unwrap();
        let object = json.as_object().unwrap();
        // only the interactive default for data survives
        assert_eq!(object.len(), 1);
        assert_eq!(object["data"], "https://example.com");
    }

    #[test]
    fn prompt_flag_serializes_under_the_design_field_name() {
        let cli = Cli::parse_from(["qrforge", "-d", "x", "--prompt", "koi pond"]);
        let json = serde_json::to_value(&cli).unwrap();
        assert_eq!(json["art_prompt"], "koi pond");
        assert!(json.get("prompt").is_none());
    }

    #[test]
    fn transparent_flag_is_absent_unless_passed() {
        let cli = Cli::parse_from(["qrforge", "-d", "x"]);
        assert_eq!(cli.transparent, None);
        let cli = Cli::parse_from(["qrforge", "-d", "x", "--transparent"]);
        assert_eq!(cli.transparent, Some(true));
    }

    #[test]
    fn rejects_invalid_colors_upfront() {
        let result = Cli::try_parse_from(["qrforge", "-d", "x", "-f", "#12345"]);
        assert!(result.is_err());
    }

    #[test]
    fn data_is_required_without_interactive_or_config() {
        assert!(Cli::try_parse_from(["qrforge"]).is_err());
        assert!(Cli::try_parse_from(["qrforge", "--interactive"]).is_ok());
        assert!(Cli::try_parse_from(["qrforge", "--config", "f.toml"]).is_ok());
    }

    #[test]
    fn arg_enums_convert_to_design_enums() {
        assert_eq!(EcLevel::from(EcLevelArg::Q), EcLevel::Q);
        assert_eq!(DotShape::from(DotShapeArg::Diamond), DotShape::Diamond);
    }
}
