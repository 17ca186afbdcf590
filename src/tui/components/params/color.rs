//! Color parameter Component: hex field, live swatch, picker entry point.

use crossterm_actions::{SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};
use tuirealm::event::{Key, KeyModifiers};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::color;
use crate::design::QrDesign;
use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::components::line_edit::LineBuffer;
use crate::tui::{dispatcher, handle_global_app_events};

/// Which color slot of the design a control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Foreground,
    Background,
}

impl ColorField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Foreground => "Foreground",
            Self::Background => "Background",
        }
    }

    pub fn current(self, design: &QrDesign) -> &str {
        match self {
            Self::Foreground => &design.foreground,
            Self::Background => &design.background,
        }
    }

    pub fn design_slot(self, design: &mut QrDesign) -> &mut String {
        match self {
            Self::Foreground => &mut design.foreground,
            Self::Background => &mut design.background,
        }
    }

    fn msg(self, value: String) -> Msg {
        match self {
            Self::Foreground => Msg::ForegroundChanged(value),
            Self::Background => Msg::BackgroundChanged(value),
        }
    }
}

/// Hex input with a live swatch. Enter opens the full picker overlay.
pub struct ColorControl {
    props: Props,
    field: ColorField,
    buffer: LineBuffer,
}

impl ColorControl {
    pub fn new(field: ColorField, value: &str) -> Self {
        Self {
            props: Props::default(),
            field,
            buffer: LineBuffer::new(value),
        }
    }

    fn commit(&self) -> Msg {
        self.field.msg(self.buffer.text().to_string())
    }
}

impl MockComponent for ColorControl {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Length(4),
                Constraint::Min(8),
            ])
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

        // Swatch, or a marker when the text does not parse
        match color::parse_color(self.buffer.text()) {
            Ok(rgb) => {
                let swatch = Paragraph::new("   ").style(Style::default().bg(color::to_tui(rgb)));
                frame.render_widget(swatch, cols[1]);
            }
            Err(_) => {
                let marker = Paragraph::new(" ✗ ").style(Style::default().fg(Color::Red));
                frame.render_widget(marker, cols[1]);
            }
        }

        let line = self.buffer.spans(cols[2].width as usize, focused);
        frame.render_widget(Paragraph::new(line), cols[2]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.buffer.text().to_string()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Type(c) => {
                self.buffer.insert(c);
                CmdResult::Changed(self.state())
            }
            Cmd::Delete => {
                if self.buffer.backspace() {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for ColorControl {
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

        match key_event.code {
            // Enter opens the plane-and-hue picker overlay
            Key::Enter => return Some(Msg::OpenColorPicker(self.field)),
            Key::Char(c)
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.insert(c);
                return Some(self.commit());
            }
            Key::Backspace => {
                return self.buffer.backspace().then(|| self.commit());
            }
            Key::Delete => {
                return self.buffer.delete().then(|| self.commit());
            }
            Key::Left => {
                self.buffer.left();
                return None;
            }
            Key::Right => {
                self.buffer.right();
                return None;
            }
            Key::Home => {
                self.buffer.home();
                return None;
            }
            Key::End => {
                self.buffer.end();
                return None;
            }
            Key::Esc => return None,
            _ => {}
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_accessors_cover_both_fields() {
        let mut design = QrDesign::default();
        *ColorField::Foreground.design_slot(&mut design) = "#123456".to_string();
        assert_eq!(ColorField::Foreground.current(&design), "#123456");
        assert_eq!(
            ColorField::Background.current(&design),
            design.background.as_str()
        );
    }

    #[test]
    fn typing_commits_the_raw_text() {
        let mut control = ColorControl::new(ColorField::Foreground, "#11223");
        control.perform(Cmd::Type('3'));
        assert_eq!(
            control.state(),
            State::One(StateValue::String("#112233".to_string()))
        );
    }
}
