//! Editor activity - the design form with live preview.

use std::io::Stdout;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Direction, Layout},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::design::{DotShape, EcLevel};
use crate::media;
use crate::tui::Model;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::params::{
    BoolControl, ColorControl, ColorField, ColorPicker, ImageControl, NumberControl, NumberField,
    PromptControl, SelectControl, SelectField, TextControl,
};
use crate::tui::components::{
    Details, MAIN_FOOTER_ACTIONS, PathPrompt, PathPromptKind, Preview, format_footer, popup_area,
    render_help,
};

// ============================================================================
// Component identifiers (scoped to EditorActivity)
// ============================================================================

/// Unique identifiers for all components in EditorActivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    // Display panel (read-only)
    Preview,

    // Form controls (editable)
    Data,
    ModuleSize,
    DotScale,
    QuietZone,
    Foreground,
    Background,
    Transparent,
    EcLevel,
    DotShape,
    ArtPrompt,
    Logo,

    // Scrollable panel
    Details,

    // Modal overlays
    ColorPicker,
    PathPrompt,
}

// ============================================================================
// Messages (scoped to EditorActivity)
// ============================================================================

/// All possible messages that can be sent in EditorActivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,

    // Focus/Navigation
    FocusNext,
    FocusPrev,

    // Form value changes
    DataChanged(String),
    ModuleSizeChanged(f64),
    DotScaleChanged(f64),
    QuietZoneChanged(f64),
    ForegroundChanged(String),
    BackgroundChanged(String),
    TransparentChanged(bool),
    EcLevelChanged(EcLevel),
    DotShapeChanged(DotShape),
    ArtPromptChanged(String),
    LogoChanged(String),

    // Picker edits, routed separately so the hex field can be resynced
    PickerColorChanged(ColorField, String),

    // Support failures surfaced in the status bar
    PromptsFailed(String),
    MediaFailed(String),

    // Overlay flow
    OpenColorPicker(ColorField),
    OpenLogoPrompt,
    OpenExportPrompt,
    CloseOverlay,
    LogoPathSubmitted(String),
    ExportPathSubmitted(String),

    // Symbol regeneration (chained after parameter changes)
    Regenerate,

    // Details scroll
    DetailsScrollUp,
    DetailsScrollDown,

    // Activity transition
    SwitchToSource,
}

// ============================================================================
// User events (required by tui-realm, currently unused)
// ============================================================================

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// Focus management (scoped to EditorActivity)
// ============================================================================

/// All focusable component IDs in form order.
const ALL_FOCUS_IDS: &[Id] = &[
    Id::Data,
    Id::ModuleSize,
    Id::DotScale,
    Id::QuietZone,
    Id::Foreground,
    Id::Background,
    Id::Transparent,
    Id::EcLevel,
    Id::DotShape,
    Id::ArtPrompt,
    Id::Logo,
    Id::Details,
];

/// Manages focus state for Tab navigation in EditorActivity.
pub struct FocusManager {
    current_idx: usize,
}

impl FocusManager {
    pub fn new() -> Self {
        Self { current_idx: 0 }
    }

    /// Get the current focus component ID.
    pub fn current_focus(&self) -> Id {
        ALL_FOCUS_IDS
            .get(self.current_idx)
            .copied()
            .unwrap_or(Id::Data)
    }

    /// Move focus to next component and return its ID.
    pub fn focus_next(&mut self) -> Id {
        self.current_idx = (self.current_idx + 1) % ALL_FOCUS_IDS.len();
        self.current_focus()
    }

    /// Move focus to previous component and return its ID.
    pub fn focus_prev(&mut self) -> Id {
        self.current_idx = (self.current_idx + ALL_FOCUS_IDS.len() - 1) % ALL_FOCUS_IDS.len();
        self.current_focus()
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// EditorActivity
// ============================================================================

/// Which modal overlay is mounted, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Overlay {
    #[default]
    None,
    Picker(ColorField),
    Path(PathPromptKind),
}

/// The design editing activity.
#[derive(Default)]
pub struct EditorActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    focus: FocusManager,
    overlay: Overlay,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl EditorActivity {
    /// Create and configure the tui-realm application.
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Mount all initial components.
    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) -> Result<()> {
        // Display component (read-only)
        app.mount(Id::Preview, Box::new(Preview::from_model(model)), vec![])?;

        // Form controls, top to bottom
        let design = &model.design;
        app.mount(Id::Data, Box::new(TextControl::new(&design.data)), vec![])?;
        app.mount(
            Id::ModuleSize,
            Box::new(NumberControl::new(NumberField::ModuleSize, design.module_size)),
            vec![],
        )?;
        app.mount(
            Id::DotScale,
            Box::new(NumberControl::new(NumberField::DotScale, design.dot_scale)),
            vec![],
        )?;
        app.mount(
            Id::QuietZone,
            Box::new(NumberControl::new(NumberField::QuietZone, design.quiet_zone)),
            vec![],
        )?;
        app.mount(
            Id::Foreground,
            Box::new(ColorControl::new(ColorField::Foreground, &design.foreground)),
            vec![],
        )?;
        app.mount(
            Id::Background,
            Box::new(ColorControl::new(ColorField::Background, &design.background)),
            vec![],
        )?;
        app.mount(
            Id::Transparent,
            Box::new(BoolControl::new(design.transparent)),
            vec![],
        )?;
        app.mount(
            Id::EcLevel,
            Box::new(SelectControl::new(SelectField::EcLevel, design.ec_level.index())),
            vec![],
        )?;
        app.mount(
            Id::DotShape,
            Box::new(SelectControl::new(SelectField::DotShape, design.dot_shape.index())),
            vec![],
        )?;
        app.mount(
            Id::ArtPrompt,
            Box::new(PromptControl::new(&design.art_prompt)),
            vec![],
        )?;
        app.mount(Id::Logo, Box::new(ImageControl::new(&design.logo)), vec![])?;

        // Details panel
        let mut details = Details::new();
        details.set_notes(model.notes.clone());
        app.mount(Id::Details, Box::new(details), vec![])?;

        // Set initial focus
        app.active(&Id::Data)?;

        Ok(())
    }

    /// Sync display-only components (Preview, Details) with current model data.
    fn sync_display_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) {
        // Remount Preview with the fresh outcome
        let _ = app.umount(&Id::Preview);
        let _ = app.mount(Id::Preview, Box::new(Preview::from_model(model)), vec![]);

        // Remount Details with the fresh notes
        let _ = app.umount(&Id::Details);
        let mut details = Details::new();
        details.set_notes(model.notes.clone());
        let _ = app.mount(Id::Details, Box::new(details), vec![]);
    }

    /// Resync one hex field after the picker rewrote its color.
    fn sync_color_control(
        app: &mut Application<Id, Msg, UserEvent>,
        model: &Model,
        field: ColorField,
    ) {
        let id = match field {
            ColorField::Foreground => Id::Foreground,
            ColorField::Background => Id::Background,
        };
        let _ = app.umount(&id);
        let control = ColorControl::new(field, field.current(&model.design));
        let _ = app.mount(id, Box::new(control), vec![]);
    }

    /// Resync the logo row after an embed or clear.
    fn sync_logo_control(app: &mut Application<Id, Msg, UserEvent>, model: &Model) {
        let _ = app.umount(&Id::Logo);
        let _ = app.mount(Id::Logo, Box::new(ImageControl::new(&model.design.logo)), vec![]);
    }

    fn open_picker(
        app: &mut Application<Id, Msg, UserEvent>,
        overlay: &mut Overlay,
        model: &Model,
        field: ColorField,
    ) {
        let picker = ColorPicker::new(field, field.current(&model.design));
        let _ = app.umount(&Id::ColorPicker);
        if app.mount(Id::ColorPicker, Box::new(picker), vec![]).is_ok()
            && app.active(&Id::ColorPicker).is_ok()
        {
            *overlay = Overlay::Picker(field);
        }
    }

    fn open_path_prompt(
        app: &mut Application<Id, Msg, UserEvent>,
        overlay: &mut Overlay,
        model: &Model,
        kind: PathPromptKind,
    ) {
        let initial = match kind {
            PathPromptKind::Export => model.export_path.clone(),
            PathPromptKind::Logo => String::new(),
        };
        let prompt = PathPrompt::new(kind, &initial);
        let _ = app.umount(&Id::PathPrompt);
        if app.mount(Id::PathPrompt, Box::new(prompt), vec![]).is_ok()
            && app.active(&Id::PathPrompt).is_ok()
        {
            *overlay = Overlay::Path(kind);
        }
    }

    /// Unmount whichever overlay is up and give focus back to the form.
    fn close_overlay(
        app: &mut Application<Id, Msg, UserEvent>,
        overlay: &mut Overlay,
        focus: &FocusManager,
    ) {
        match overlay {
            Overlay::Picker(_) => {
                let _ = app.umount(&Id::ColorPicker);
            }
            Overlay::Path(_) => {
                let _ = app.umount(&Id::PathPrompt);
            }
            Overlay::None => {}
        }
        *overlay = Overlay::None;
        let _ = app.active(&focus.current_focus());
    }
}

impl Activity for EditorActivity {
    fn on_create(&mut self, context: Context) {
        self.context = Some(context);
        let mut app = Self::create_application();

        let model = &self.context.as_ref().unwrap().model;
        if let Err(e) = Self::mount_components(&mut app, model) {
            tracing::error!("Failed to mount components: {}", e);
        }

        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self.app.as_mut().expect("app should be initialized");
        let model = &mut self.context.as_mut().expect("context should be set").model;
        let overlay = self.overlay;

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            let main_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(10),   // Content
                    Constraint::Length(1), // Status
                ])
                .split(area);

            // Title bar
            let title = match &model.outcome {
                Some(outcome) => format!(" qrforge - QR version {} ", outcome.version),
                None => " qrforge ".to_string(),
            };
            let title_widget =
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title_widget, main_rows[0]);

            // Content: 2 columns
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main_rows[1]);

            // Left column: Preview
            app.view(&Id::Preview, frame, cols[0]);

            // Form section layout - heights defined once, total computed automatically
            const PARAM_HEIGHTS: &[u16] = &[
                1, // 0: Data
                1, // 1: Module size
                1, // 2: Dot scale
                1, // 3: Quiet zone
                1, // 4: Spacer
                1, // 5: Foreground
                1, // 6: Background
                1, // 7: Transparent
                1, // 8: Spacer
                1, // 9: Error correction
                1, // 10: Dot shape
                1, // 11: Spacer
                1, // 12: Art prompt
                1, // 13: Logo
            ];
            const PARAMS_CONTENT_HEIGHT: u16 = const {
                let mut sum = 0u16;
                let mut i = 0;
                while i < PARAM_HEIGHTS.len() {
                    sum += PARAM_HEIGHTS[i];
                    i += 1;
                }
                sum
            };

            // Right column: Design form (content + borders) + Details (fills remaining)
            let right_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(PARAMS_CONTENT_HEIGHT + 2),
                    Constraint::Fill(1),
                ])
                .split(cols[1]);

            let params_area = right_rows[0];
            let params_block = Block::default().title(" Design ").borders(Borders::ALL);
            let params_inner = params_block.inner(params_area);
            frame.render_widget(params_block, params_area);

            let param_constraints: Vec<Constraint> = PARAM_HEIGHTS
                .iter()
                .map(|h| Constraint::Length(*h))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect();
            let param_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(param_constraints)
                .split(params_inner);

            app.view(&Id::Data, frame, param_rows[0]);
            app.view(&Id::ModuleSize, frame, param_rows[1]);
            app.view(&Id::DotScale, frame, param_rows[2]);
            app.view(&Id::QuietZone, frame, param_rows[3]);
            app.view(&Id::Foreground, frame, param_rows[5]);
            app.view(&Id::Background, frame, param_rows[6]);
            app.view(&Id::Transparent, frame, param_rows[7]);
            app.view(&Id::EcLevel, frame, param_rows[9]);
            app.view(&Id::DotShape, frame, param_rows[10]);
            app.view(&Id::ArtPrompt, frame, param_rows[12]);
            app.view(&Id::Logo, frame, param_rows[13]);

            // Details panel
            app.view(&Id::Details, frame, right_rows[1]);

            // Status bar
            let status = model
                .message
                .clone()
                .unwrap_or_else(|| format_footer(MAIN_FOOTER_ACTIONS, &[("adjust", "[]/{}")]));

            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, main_rows[2]);

            // Modal overlays draw on top of the form
            match overlay {
                Overlay::Picker(_) => {
                    app.view(&Id::ColorPicker, frame, popup_area(area, 60, 60));
                }
                Overlay::Path(_) => {
                    app.view(&Id::PathPrompt, frame, popup_area(area, 50, 20));
                }
                Overlay::None => {}
            }

            // Help modal overlay
            if model.show_help {
                render_help(frame);
            }
        })?;

        // Handle help modal events separately (intercepts all input when visible)
        if model.show_help {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.show_help = false;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        // Use tick() - the canonical tui-realm heartbeat
        match app.tick(PollStrategy::Once) {
            Ok(messages) => {
                let mut needs_sync = false;
                let mut picker_sync: Option<ColorField> = None;
                let mut logo_sync = false;

                for msg in messages {
                    // Handle focus and overlay flow at activity level
                    match &msg {
                        Msg::FocusNext => {
                            let next = self.focus.focus_next();
                            let _ = app.active(&next);
                        }
                        Msg::FocusPrev => {
                            let prev = self.focus.focus_prev();
                            let _ = app.active(&prev);
                        }
                        Msg::SwitchToSource => {
                            self.exit_reason = Some(ExitReason::SwitchToSource);
                            return Ok(());
                        }
                        Msg::OpenColorPicker(field) => {
                            Self::open_picker(app, &mut self.overlay, model, *field);
                        }
                        Msg::OpenLogoPrompt => {
                            Self::open_path_prompt(
                                app,
                                &mut self.overlay,
                                model,
                                PathPromptKind::Logo,
                            );
                        }
                        Msg::OpenExportPrompt => {
                            Self::open_path_prompt(
                                app,
                                &mut self.overlay,
                                model,
                                PathPromptKind::Export,
                            );
                        }
                        Msg::CloseOverlay
                        | Msg::LogoPathSubmitted(_)
                        | Msg::ExportPathSubmitted(_) => {
                            Self::close_overlay(app, &mut self.overlay, &self.focus);
                        }
                        Msg::PickerColorChanged(field, _) => {
                            picker_sync = Some(*field);
                        }
                        Msg::LogoChanged(_) => {
                            logo_sync = true;
                        }
                        _ => {}
                    }

                    // Check for quit
                    if matches!(msg, Msg::Quit) {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }

                    // A submitted logo path becomes an embed before the model
                    // sees anything
                    let msg = match msg {
                        Msg::LogoPathSubmitted(path) => {
                            if path.is_empty() {
                                continue;
                            }
                            match media::to_data_url(Path::new(&path), 1.0) {
                                Ok(url) => {
                                    logo_sync = true;
                                    Msg::LogoChanged(url)
                                }
                                Err(e) => Msg::MediaFailed(e.to_string()),
                            }
                        }
                        other => other,
                    };

                    // Process through model, handle chained messages
                    let mut current = Some(msg);
                    while let Some(m) = current {
                        // Track if regeneration happened
                        if matches!(m, Msg::Regenerate) {
                            needs_sync = true;
                        }
                        current = model.update(Some(m));
                    }
                }

                // Sync components after changes
                if needs_sync {
                    Self::sync_display_components(app, model);
                }
                if let Some(field) = picker_sync {
                    Self::sync_color_control(app, model, field);
                }
                if logo_sync {
                    Self::sync_logo_control(app, model);
                    let _ = app.active(&self.focus.current_focus());
                }
            }
            Err(_) => {
                // Timeout is fine, just continue
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
