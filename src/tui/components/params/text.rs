//! Free text Component for the encoded data, committing every keystroke.

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

use crate::params::{self, Field, ParamKind};
use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::components::line_edit::LineBuffer;
use crate::tui::{dispatcher, handle_global_app_events};

/// Single-line editor for the QR payload. Printable keys land in the
/// buffer before the dispatcher sees them, so bindings like `q` still
/// type normally here.
pub struct TextControl {
    props: Props,
    buffer: LineBuffer,
    placeholder: &'static str,
}

impl TextControl {
    pub fn new(value: &str) -> Self {
        let placeholder = match params::spec(Field::Data).kind {
            ParamKind::Text { placeholder } => placeholder,
            _ => "",
        };
        Self {
            props: Props::default(),
            buffer: LineBuffer::new(value),
            placeholder,
        }
    }

    fn commit(&self) -> Msg {
        Msg::DataChanged(self.buffer.text().to_string())
    }
}

impl MockComponent for TextControl {
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
        frame.render_widget(Paragraph::new("Data:").style(label_style), cols[0]);

        if self.buffer.text().is_empty() && !focused {
            let hint = Paragraph::new(self.placeholder).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(hint, cols[1]);
            return;
        }

        let line = self.buffer.spans(cols[1].width as usize, focused);
        frame.render_widget(Paragraph::new(line), cols[1]);
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

impl Component<Msg, UserEvent> for TextControl {
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

        // Raw editing keys first, dispatcher only for what the buffer
        // does not claim
        match key_event.code {
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
            // Single line field, Enter and Esc have nothing to do
            Key::Enter | Key::Esc => return None,
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
    fn typing_commits_every_keystroke() {
        let mut control = TextControl::new("ab");
        let result = control.perform(Cmd::Type('c'));
        assert_eq!(
            result,
            CmdResult::Changed(State::One(StateValue::String("abc".to_string())))
        );
    }

    #[test]
    fn delete_on_empty_reports_nothing() {
        let mut control = TextControl::new("");
        assert_eq!(control.perform(Cmd::Delete), CmdResult::None);
    }
}
