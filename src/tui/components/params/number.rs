//! Numeric parameter Component: slider plus inline text editing.

use crossterm_actions::{InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::params::{self, NumberConfig};
use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::{dispatcher, handle_global_app_events};

/// Which design field this number control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    ModuleSize,
    DotScale,
    QuietZone,
}

impl NumberField {
    fn label(self) -> &'static str {
        match self {
            Self::ModuleSize => "Module size",
            Self::DotScale => "Dot scale",
            Self::QuietZone => "Quiet zone",
        }
    }

    fn config(self) -> NumberConfig {
        match self {
            Self::ModuleSize => params::MODULE_SIZE,
            Self::DotScale => params::DOT_SCALE,
            Self::QuietZone => params::QUIET_ZONE,
        }
    }

    fn msg(self, value: f64) -> Msg {
        match self {
            Self::ModuleSize => Msg::ModuleSizeChanged(value),
            Self::DotScale => Msg::DotScaleChanged(value),
            Self::QuietZone => Msg::QuietZoneChanged(value),
        }
    }
}

/// Slider with a value column; typing a digit switches to text entry.
pub struct NumberControl {
    props: Props,
    field: NumberField,
    config: NumberConfig,
    value: f64,
    /// Whether currently editing the value as text
    editing: bool,
    /// Buffer for typed input during editing
    edit_buffer: String,
}

impl NumberControl {
    pub fn new(field: NumberField, value: f64) -> Self {
        Self {
            props: Props::default(),
            field,
            config: field.config(),
            value,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    fn display_value(&self) -> String {
        if self.config.step == 1.0 {
            format!("{:.0}", self.value)
        } else {
            format!("{:.2}", self.value)
        }
    }

    fn start_editing(&mut self) {
        self.editing = true;
        self.edit_buffer = if self.value.is_finite() {
            self.display_value()
        } else {
            String::new()
        };
    }

    fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    /// Commit the buffer. Non-numeric text becomes NaN on purpose so the
    /// details pane can call it out.
    fn confirm_editing(&mut self) -> f64 {
        self.editing = false;
        let committed = self.config.commit_text(&self.edit_buffer);
        self.edit_buffer.clear();
        self.value = committed;
        committed
    }

    fn type_char(&mut self, c: char) {
        let ok = c.is_ascii_digit()
            || (c == '.' && !self.edit_buffer.contains('.'))
            || (c == '-' && self.edit_buffer.is_empty());
        if ok {
            self.edit_buffer.push(c);
        }
    }

    fn delete_char(&mut self) {
        self.edit_buffer.pop();
    }

    fn adjust(&mut self, steps: f64) {
        self.value = self.config.step_by(self.value, steps);
    }
}

impl MockComponent for NumberControl {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(10)])
            .split(area);

        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let label = Paragraph::new(format!("{}:", self.field.label())).style(label_style);
        frame.render_widget(label, cols[0]);

        if self.editing {
            // Show edit buffer with block cursor cell
            let line = Line::from(vec![
                Span::styled(
                    self.edit_buffer.clone(),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
                Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
            ]);
            frame.render_widget(Paragraph::new(line), cols[1]);
            return;
        }

        let slider_width = cols[1].width.saturating_sub(8) as usize;
        let ratio = self.config.ratio(self.value);
        let pos = (ratio * slider_width as f64).round() as usize;
        let pos = pos.min(slider_width.saturating_sub(1));

        let (filled_style, empty_style, handle_style) = if focused {
            (
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
            )
        };

        let mut spans = Vec::new();
        for i in 0..slider_width {
            if i == pos {
                spans.push(Span::styled("●", handle_style));
            } else if i < pos {
                spans.push(Span::styled("━", filled_style));
            } else {
                spans.push(Span::styled("─", empty_style));
            }
        }

        spans.push(Span::styled(
            format!(" {}", self.display_value()),
            if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            },
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::F64(self.value))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Left) => {
                self.adjust(-1.0);
                CmdResult::Changed(self.state())
            }
            Cmd::Move(CmdDirection::Right) => {
                self.adjust(1.0);
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for NumberControl {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        if !focused {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Handle editing mode separately (raw key input)
        if self.editing {
            match key_event.code {
                tuirealm::event::Key::Enter => {
                    let committed = self.confirm_editing();
                    return Some(self.field.msg(committed));
                }
                // Tab is consumed by the commit, focus stays put
                tuirealm::event::Key::Tab => {
                    let committed = self.confirm_editing();
                    return Some(self.field.msg(committed));
                }
                tuirealm::event::Key::Esc => {
                    self.cancel_editing();
                    return None;
                }
                tuirealm::event::Key::Backspace => {
                    self.delete_char();
                    return None;
                }
                tuirealm::event::Key::Char(c) => {
                    self.type_char(c);
                    return None;
                }
                _ => return None,
            }
        }

        // Typing a number starts editing directly
        if let tuirealm::event::Key::Char(c) = key_event.code
            && (c.is_ascii_digit() || c == '-' || c == '.')
        {
            self.editing = true;
            self.edit_buffer.clear();
            self.type_char(c);
            return None;
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),

            // Enter starts editing with the current value pre-filled
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                self.start_editing();
                None
            }

            // Arrows move through the form vertically, adjust horizontally
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => Some(Msg::FocusPrev),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                if let CmdResult::Changed(_) = self.perform(Cmd::Move(CmdDirection::Left)) {
                    Some(self.field.msg(self.value))
                } else {
                    None
                }
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                if let CmdResult::Changed(_) = self.perform(Cmd::Move(CmdDirection::Right)) {
                    Some(self.field.msg(self.value))
                } else {
                    None
                }
            }

            // Value adjustment: [/] for ±1 step, {/} for ±5 steps
            AppAction::ValueDecrementSmall => {
                self.adjust(-1.0);
                Some(self.field.msg(self.value))
            }
            AppAction::ValueIncrementSmall => {
                self.adjust(1.0);
                Some(self.field.msg(self.value))
            }
            AppAction::ValueDecrementLarge => {
                self.adjust(-5.0);
                Some(self.field.msg(self.value))
            }
            AppAction::ValueIncrementLarge => {
                self.adjust(5.0);
                Some(self.field.msg(self.value))
            }

            _ => None,
        }
    }
}
