//! CLI entry point for qrforge.

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use qrforge::cli::{Cli, FormatArg};
use qrforge::design::QrDesign;
use qrforge::{config, logging, media, qr, render, tui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        Cli::print_completions(shell);
        return Ok(());
    }

    let _guard = logging::init_logging(cli.log_file.as_deref(), Some(&cli.log_level));

    // Resolve the design: defaults, then the design file, then CLI flags
    let mut design = config::resolve(cli.config.as_deref(), &cli).map_err(|e| eyre!("{e}"))?;

    if let Some(ref logo_path) = cli.logo {
        design.logo = media::to_data_url(logo_path, 1.0)
            .map_err(|e| eyre!("Cannot embed logo '{}': {}", logo_path.display(), e))?;
    }

    if let Some(ref path) = cli.save_config {
        config::save(&design, path).map_err(|e| eyre!("{e}"))?;
        eprintln!("Wrote design to {}", path.display());
    }

    // Launch TUI if --interactive flag is set
    if cli.interactive {
        return tui::run(design);
    }

    let outcome = qr::build(&design).map_err(|e| eyre!("{e}"))?;
    tracing::info!(
        version = %outcome.version,
        modules = outcome.width,
        "symbol encoded"
    );

    match output_format(&cli)? {
        OutputFormat::Svg => {
            let svg = render::svg(&design, &outcome);
            if let Some(ref path) = cli.output {
                std::fs::write(path, &svg)
                    .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("Wrote SVG to {}", path.display());
            } else {
                print!("{svg}");
            }
        }
        OutputFormat::Png => {
            let Some(ref path) = cli.output else {
                bail!("PNG output requires --output");
            };
            let bytes = render::png_bytes(&design, &outcome).map_err(|e| eyre!("{e}"))?;
            std::fs::write(path, &bytes)
                .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
            eprintln!("Wrote PNG to {}", path.display());
        }
    }

    report_color_fallbacks(&design);

    Ok(())
}

/// Pick the output format from the --format flag or the file extension.
fn output_format(cli: &Cli) -> Result<OutputFormat> {
    match cli.format {
        FormatArg::Svg => Ok(OutputFormat::Svg),
        FormatArg::Png => Ok(OutputFormat::Png),
        FormatArg::Auto => {
            let by_extension = cli
                .output
                .as_deref()
                .and_then(Path::extension)
                .map(|ext| ext.eq_ignore_ascii_case("png"));
            Ok(if by_extension == Some(true) {
                OutputFormat::Png
            } else {
                OutputFormat::Svg
            })
        }
    }
}

/// Warn when a design file carried colors the renderer had to replace.
/// CLI flags are validated at parse time, so these come from files only.
fn report_color_fallbacks(design: &QrDesign) {
    for (label, value) in [
        ("foreground", &design.foreground),
        ("background", &design.background),
    ] {
        if qrforge::color::parse_color(value).is_err() {
            eprintln!("Warning: {label} color '{value}' is not parseable, using fallback");
        }
    }
}
