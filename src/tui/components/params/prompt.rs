//! Art prompt Component: free text plus a randomize shortcut.

use crossterm_actions::{SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::event::{Key, KeyModifiers};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::params::{self, Field, ParamKind};
use crate::prompts;
use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::components::line_edit::LineBuffer;
use crate::tui::{dispatcher, handle_global_app_events};

/// Prompt editor. Ctrl+R swaps in a random prompt from the library.
pub struct PromptControl {
    props: Props,
    buffer: LineBuffer,
    placeholder: &'static str,
}

impl PromptControl {
    pub fn new(value: &str) -> Self {
        let placeholder = match params::spec(Field::ArtPrompt).kind {
            ParamKind::Prompt { placeholder } => placeholder,
            _ => "",
        };
        Self {
            props: Props::default(),
            buffer: LineBuffer::new(value),
            placeholder,
        }
    }

    fn commit(&self) -> Msg {
        Msg::ArtPromptChanged(self.buffer.text().to_string())
    }

    fn randomize(&mut self) -> Option<Msg> {
        match prompts::random_prompt() {
            Ok(Some(prompt)) => {
                self.buffer.set_text(prompt.clone());
                self.buffer.end();
                Some(Msg::ArtPromptChanged(prompt))
            }
            // Empty library leaves the field alone
            Ok(None) => None,
            Err(e) => Some(Msg::PromptsFailed(e.to_string())),
        }
    }
}

impl MockComponent for PromptControl {
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
        frame.render_widget(Paragraph::new("Art prompt:").style(label_style), cols[0]);

        if self.buffer.text().is_empty() && !focused {
            let hint = Paragraph::new(self.placeholder).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(hint, cols[1]);
            return;
        }

        // Reserve a short suffix reminding about the randomize key
        let suffix = " ⟳^R";
        let field_width = (cols[1].width as usize).saturating_sub(suffix.chars().count());
        let mut line = self.buffer.spans(field_width, focused);
        if focused {
            line.spans.push(Span::styled(
                suffix,
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(line.spans)), cols[1]);
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

impl Component<Msg, UserEvent> for PromptControl {
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

        // Randomize before anything else claims Ctrl+R
        if key_event.code == Key::Char('r')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return self.randomize();
        }

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
    fn randomize_fills_the_buffer_from_the_library() {
        let mut control = PromptControl::new("");
        let msg = control.randomize();
        let Some(Msg::ArtPromptChanged(prompt)) = msg else {
            panic!("expected a prompt change");
        };
        assert_eq!(control.buffer.text(), prompt);
        assert!(!prompt.is_empty());
    }
}
