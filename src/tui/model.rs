//! Application model for the TUI.

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tuirealm::Update;

use crate::color;
use crate::design::QrDesign;
use crate::qr::{self, QrOutcome};
use crate::render;

use super::activities::Msg;

/// Severity of a diagnostics line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLevel {
    Info,
    Warning,
    Error,
}

/// One line in the details pane.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignNote {
    pub level: NoteLevel,
    pub text: String,
}

/// Application model containing all state.
pub struct Model {
    /// The design being edited
    pub design: QrDesign,

    // Derived output
    pub outcome: Option<QrOutcome>,
    pub svg: String,
    pub notes: Vec<DesignNote>,

    // UI state
    pub quit: bool,
    pub show_help: bool,
    pub message: Option<String>,
    pub export_path: String,
}

impl Model {
    pub fn new(design: QrDesign) -> Self {
        Self {
            design,
            outcome: None,
            svg: String::new(),
            notes: Vec::new(),
            quit: false,
            show_help: false,
            message: None,
            export_path: String::from("qr.svg"),
        }
    }

    fn note(&mut self, level: NoteLevel, text: String) {
        self.notes.push(DesignNote { level, text });
    }

    /// Rebuild the symbol and its SVG from the current design.
    pub fn regenerate(&mut self) {
        self.notes.clear();
        match qr::build(&self.design) {
            Ok(outcome) => {
                self.note(
                    NoteLevel::Info,
                    format!(
                        "version {}, {}x{} modules, {} dark",
                        outcome.version, outcome.width, outcome.width, outcome.dark_count
                    ),
                );
                self.note(
                    NoteLevel::Info,
                    format!("payload {} bytes, level {}", self.design.data.len(), self.design.ec_level.label()),
                );
                self.svg = render::svg(&self.design, &outcome);
                self.outcome = Some(outcome);
            }
            Err(e) => {
                tracing::warn!(error = %e, "symbol rebuild failed");
                self.outcome = None;
                self.svg.clear();
                self.note(NoteLevel::Error, e.to_string());
            }
        }

        for (label, value) in [
            ("foreground", self.design.foreground.clone()),
            ("background", self.design.background.clone()),
        ] {
            if color::parse_color(&value).is_err() {
                self.note(
                    NoteLevel::Warning,
                    format!("{label} '{value}' is not parseable, rendering with fallback"),
                );
            }
        }
        for (label, value) in [
            ("module size", self.design.module_size),
            ("dot scale", self.design.dot_scale),
            ("quiet zone", self.design.quiet_zone),
        ] {
            if !value.is_finite() {
                self.note(
                    NoteLevel::Warning,
                    format!("{label} is not a number, rendering with default"),
                );
            }
        }
        if self.design.has_logo() {
            self.note(
                NoteLevel::Info,
                format!("logo embedded ({} KB)", self.design.logo.len() / 1024),
            );
        }

        self.message = None;
    }

    /// Export the rendered design to `export_path`. A `.png` extension picks
    /// the raster path, anything else gets the SVG text.
    pub fn export(&mut self) -> Result<()> {
        let Some(ref outcome) = self.outcome else {
            self.message = Some("Nothing to export".to_string());
            return Ok(());
        };
        let path = PathBuf::from(&self.export_path);
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png {
            let bytes = render::png_bytes(&self.design, outcome).map_err(|e| eyre!("{e}"))?;
            std::fs::write(&path, &bytes)
                .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        } else {
            std::fs::write(&path, &self.svg)
                .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        }
        tracing::info!(path = %path.display(), "design exported");
        self.message = Some(format!("Exported to {}", path.display()));
        Ok(())
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }

            // Field edits
            Msg::DataChanged(v) => {
                self.design.data = v;
                Some(Msg::Regenerate)
            }
            Msg::ModuleSizeChanged(v) => {
                self.design.module_size = v;
                Some(Msg::Regenerate)
            }
            Msg::DotScaleChanged(v) => {
                self.design.dot_scale = v;
                Some(Msg::Regenerate)
            }
            Msg::QuietZoneChanged(v) => {
                self.design.quiet_zone = v;
                Some(Msg::Regenerate)
            }
            Msg::ForegroundChanged(v) => {
                self.design.foreground = v;
                Some(Msg::Regenerate)
            }
            Msg::BackgroundChanged(v) => {
                self.design.background = v;
                Some(Msg::Regenerate)
            }
            Msg::PickerColorChanged(field, v) => {
                *field.design_slot(&mut self.design) = v;
                Some(Msg::Regenerate)
            }
            Msg::TransparentChanged(v) => {
                self.design.transparent = v;
                Some(Msg::Regenerate)
            }
            Msg::EcLevelChanged(v) => {
                self.design.ec_level = v;
                Some(Msg::Regenerate)
            }
            Msg::DotShapeChanged(v) => {
                self.design.dot_shape = v;
                Some(Msg::Regenerate)
            }
            Msg::ArtPromptChanged(v) => {
                self.design.art_prompt = v;
                Some(Msg::Regenerate)
            }
            Msg::LogoChanged(v) => {
                self.design.logo = v;
                Some(Msg::Regenerate)
            }

            // Failure reports from the controls
            Msg::PromptsFailed(e) => {
                self.message = Some(format!("Randomize failed: {e}"));
                None
            }
            Msg::MediaFailed(e) => {
                self.message = Some(format!("Logo failed: {e}"));
                None
            }

            // Regenerate
            Msg::Regenerate => {
                self.regenerate();
                None
            }

            // Help overlay
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }

            // Export
            Msg::ExportPathSubmitted(path) => {
                self.export_path = path;
                if let Err(e) = self.export() {
                    self.message = Some(format!("Export failed: {e}"));
                }
                None
            }

            // Handled at the activity level
            Msg::FocusNext
            | Msg::FocusPrev
            | Msg::OpenColorPicker(_)
            | Msg::OpenLogoPrompt
            | Msg::OpenExportPrompt
            | Msg::CloseOverlay
            | Msg::LogoPathSubmitted(_)
            | Msg::DetailsScrollUp
            | Msg::DetailsScrollDown
            | Msg::SwitchToSource => None,
        }
    }
}
