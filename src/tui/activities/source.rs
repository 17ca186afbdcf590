//! Source activity - displays the generated SVG markup with syntax highlighting.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm_actions::{NavigationEvent, TuiEvent};
use palette::Srgb;
use ratatui::{
    Terminal,
    crossterm::event::{self, Event as CrosstermEvent, KeyCode},
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Application, Component, Event, EventListenerCfg, MockComponent, PollStrategy, State,
    StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::color;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{SOURCE_FOOTER_ACTIONS, format_footer, render_help};
use crate::tui::highlighting::Highlighter;
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

// ============================================================================
// Component identifiers (scoped to SourceActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    SourceView,
}

// ============================================================================
// Messages (scoped to SourceActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    Back,
    ShowHelp,
    ScrollUp,
    ScrollDown,
}

// ============================================================================
// User events (required by tui-realm)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// SourceView Component
// ============================================================================

/// Display colors derived from the design's own palette.
pub struct SourceViewColors {
    pub background: Color,
    pub gutter_fg: Color,
    pub border: Color,
}

/// Linear blend between two design colors, for gutter and border tones.
fn blend(a: Srgb<u8>, b: Srgb<u8>, t: f32) -> Color {
    let lerp =
        |x: u8, y: u8| -> u8 { (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8 };
    Color::Rgb(
        lerp(a.red, b.red),
        lerp(a.green, b.green),
        lerp(a.blue, b.blue),
    )
}

pub struct SourceView {
    props: Props,
    lines: Vec<Line<'static>>,
    scroll: usize,
    visible_height: usize,
    colors: SourceViewColors,
}

impl SourceView {
    pub fn new(colors: SourceViewColors) -> Self {
        Self {
            props: Props::default(),
            lines: Vec::new(),
            scroll: 0,
            visible_height: 20,
            colors,
        }
    }

    pub fn set_lines(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.scroll = 0;
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        let max_scroll = self.lines.len().saturating_sub(self.visible_height);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }
}

impl MockComponent for SourceView {
    fn view(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let bg_style = Style::default().bg(self.colors.background);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(bg_style.fg(self.colors.border))
            .style(bg_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;

        if self.lines.is_empty() {
            let placeholder = Paragraph::new("Nothing generated yet")
                .style(bg_style.add_modifier(Modifier::DIM));
            frame.render_widget(placeholder, inner);
            return;
        }

        // Render highlighted lines with line numbers
        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .map(|(i, line)| {
                let line_num = format!("{:4} ", i + 1);
                let mut spans = vec![ratatui::text::Span::styled(
                    line_num,
                    Style::default()
                        .fg(self.colors.gutter_fg)
                        .bg(self.colors.background),
                )];
                spans.extend(line.spans.clone());
                Line::from(spans)
            })
            .collect();

        let code_widget = Paragraph::new(visible_lines).style(bg_style);
        frame.render_widget(code_widget, inner);

        // Scrollbar
        if self.lines.len() > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state = ScrollbarState::new(self.lines.len()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => {
                self.scroll_up();
                CmdResult::Changed(self.state())
            }
            Cmd::Scroll(CmdDirection::Down) => {
                self.scroll_down();
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for SourceView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        // Extract keyboard event
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Handle Esc for going back (not mapped in dispatcher)
        if key_event.code == tuirealm::event::Key::Esc {
            return Some(Msg::Back);
        }

        // Use dispatcher to convert to semantic action
        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            // Convert global Msg to our local Msg
            return match msg {
                crate::tui::activities::Msg::Quit => Some(Msg::Quit),
                crate::tui::activities::Msg::ShowHelp => Some(Msg::ShowHelp),
                crate::tui::activities::Msg::SwitchToSource => Some(Msg::Back), // Toggle back
                _ => None,
            };
        }

        match action {
            // Scrolling
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Scroll(CmdDirection::Up));
                Some(Msg::ScrollUp)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Scroll(CmdDirection::Down));
                Some(Msg::ScrollDown)
            }

            _ => None,
        }
    }
}

// ============================================================================
// SourceActivity
// ============================================================================

#[derive(Default)]
pub struct SourceActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
    line_total: usize,
}

impl SourceActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }
}

impl Activity for SourceActivity {
    fn on_create(&mut self, context: Context) {
        // Theme the view with the design's own colors
        let design = &context.model.design;
        let fg = color::parse_or(&design.foreground, Srgb::new(0, 0, 0));
        let bg = color::parse_or(&design.background, Srgb::new(255, 255, 255));
        let highlighter = Highlighter::new(fg, bg);

        let lines = if context.model.svg.is_empty() {
            Vec::new()
        } else {
            highlighter.highlight(&context.model.svg, "xml")
        };
        self.line_total = lines.len();

        let colors = SourceViewColors {
            background: highlighter.background_color(),
            gutter_fg: blend(fg, bg, 0.55),
            border: blend(fg, bg, 0.8),
        };

        self.context = Some(context);

        // Create application and mount component
        let mut app = Self::create_application();
        let mut source_view = SourceView::new(colors);
        source_view.set_lines(lines);
        let _ = app.mount(Id::SourceView, Box::new(source_view), vec![]);
        let _ = app.active(&Id::SourceView);

        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self.app.as_mut().expect("app should be initialized");
        let model = &mut self.context.as_mut().expect("context should be set").model;
        let line_total = self.line_total;

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(10),   // Source
                    Constraint::Length(1), // Status
                ])
                .split(area);

            // Title bar
            let title = if line_total == 0 {
                " qrforge - SVG source ".to_string()
            } else {
                format!(" qrforge - SVG source ({} lines) ", line_total)
            };
            let title_widget =
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title_widget, rows[0]);

            // Source view
            app.view(&Id::SourceView, frame, rows[1]);

            // Status bar
            let status = format_footer(SOURCE_FOOTER_ACTIONS, &[("scroll", "↑/↓")]);
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, rows[2]);

            // Help modal overlay
            if model.show_help {
                render_help(frame);
            }
        })?;

        // Handle help modal events separately (intercepts all input when visible)
        if model.show_help {
            if let CrosstermEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.show_help = false;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        // Process events through tui-realm
        match app.tick(PollStrategy::Once) {
            Ok(messages) => {
                for msg in messages {
                    match msg {
                        Msg::Quit => {
                            self.exit_reason = Some(ExitReason::Quit);
                            return Ok(());
                        }
                        Msg::Back => {
                            self.exit_reason = Some(ExitReason::SwitchToEditor);
                            return Ok(());
                        }
                        Msg::ShowHelp => {
                            model.show_help = true;
                        }
                        Msg::ScrollUp | Msg::ScrollDown => {
                            // Already handled in component
                        }
                    }
                }
            }
            Err(_) => {
                // Timeout, continue
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
