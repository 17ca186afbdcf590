//! Logo upload Component: opens the path prompt and clears the embed.

use crossterm_actions::{InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::event::Key;
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::telemetry;
use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::{dispatcher, handle_global_app_events};

/// Upload button plus a summary of the embedded logo, if any.
pub struct ImageControl {
    props: Props,
    has_logo: bool,
    summary: String,
}

impl ImageControl {
    pub fn new(logo: &str) -> Self {
        let has_logo = !logo.is_empty();
        let summary = if has_logo {
            format!("embedded, {} KB", logo.len() / 1024)
        } else {
            "(none)".to_string()
        };
        Self {
            props: Props::default(),
            has_logo,
            summary,
        }
    }

    /// The tracking event fires when the prompt opens, not when a file
    /// actually lands.
    fn open_prompt(&self) -> Msg {
        telemetry::track("upload_image_button");
        Msg::OpenLogoPrompt
    }
}

impl MockComponent for ImageControl {
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
        frame.render_widget(Paragraph::new("Logo:").style(label_style), cols[0]);

        let button_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut spans = vec![
            Span::styled("[ Upload logo ]", button_style),
            Span::raw(" "),
            Span::styled(
                self.summary.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            ),
        ];
        if self.has_logo && focused {
            spans.push(Span::styled(
                "  ⌫ clears",
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(usize::from(self.has_logo)))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for ImageControl {
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

        // Clearing works without going through the prompt
        if matches!(key_event.code, Key::Backspace | Key::Delete) {
            if self.has_logo {
                self.has_logo = false;
                self.summary = "(none)".to_string();
                return Some(Msg::LogoChanged(String::new()));
            }
            return None;
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),

            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => Some(self.open_prompt()),

            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => Some(Msg::FocusPrev),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => Some(Msg::FocusNext),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_an_embedded_logo() {
        let control = ImageControl::new(&"x".repeat(4096));
        assert!(control.has_logo);
        assert_eq!(control.summary, "embedded, 4 KB");
    }

    #[test]
    fn opening_the_prompt_counts_the_event() {
        let control = ImageControl::new("");
        let before = telemetry::count("upload_image_button");
        assert_eq!(control.open_prompt(), Msg::OpenLogoPrompt);
        assert_eq!(telemetry::count("upload_image_button"), before + 1);
    }
}
