//! Boolean switch Component for the transparent background flag.

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
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::{dispatcher, handle_global_app_events};

/// On/off switch rendered as `◂ off ▸`.
pub struct BoolControl {
    props: Props,
    value: bool,
}

impl BoolControl {
    pub fn new(value: bool) -> Self {
        Self {
            props: Props::default(),
            value,
        }
    }

    fn toggle(&mut self) {
        self.value = !self.value;
    }
}

impl MockComponent for BoolControl {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(8)])
            .split(area);

        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new("Transparent:").style(label_style), cols[0]);

        let arrow_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if self.value {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let line = Line::from(vec![
            Span::styled("◂ ", arrow_style),
            Span::styled(if self.value { "on " } else { "off" }, value_style),
            Span::styled(" ▸", arrow_style),
        ]);
        frame.render_widget(Paragraph::new(line), cols[1]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(usize::from(self.value)))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Toggle
            | Cmd::Move(CmdDirection::Left)
            | Cmd::Move(CmdDirection::Right) => {
                self.toggle();
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for BoolControl {
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

        // Space toggles, before the dispatcher claims it
        if key_event.code == Key::Char(' ') {
            self.toggle();
            return Some(Msg::TransparentChanged(self.value));
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),

            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                self.toggle();
                Some(Msg::TransparentChanged(self.value))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left))
            | AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                self.toggle();
                Some(Msg::TransparentChanged(self.value))
            }
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
    fn toggle_flips_both_ways() {
        let mut control = BoolControl::new(false);
        assert_eq!(
            control.perform(Cmd::Toggle),
            CmdResult::Changed(State::One(StateValue::Usize(1)))
        );
        assert_eq!(
            control.perform(Cmd::Move(CmdDirection::Left)),
            CmdResult::Changed(State::One(StateValue::Usize(0)))
        );
    }
}
