//! Option cycler Component for the enumerated design fields.

use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
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

use crate::design::{DotShape, EcLevel};
use crate::params;
use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::{dispatcher, handle_global_app_events};

/// Which enumerated field this selector edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectField {
    EcLevel,
    DotShape,
}

impl SelectField {
    fn label(self) -> &'static str {
        match self {
            Self::EcLevel => "Correction",
            Self::DotShape => "Dot shape",
        }
    }

    fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::EcLevel => params::EC_OPTIONS,
            Self::DotShape => params::SHAPE_OPTIONS,
        }
    }

    fn msg(self, index: usize) -> Msg {
        match self {
            Self::EcLevel => {
                let level = EcLevel::ALL.get(index).copied().unwrap_or_default();
                Msg::EcLevelChanged(level)
            }
            Self::DotShape => {
                let shape = DotShape::ALL.get(index).copied().unwrap_or_default();
                Msg::DotShapeChanged(shape)
            }
        }
    }
}

/// Cycles through the field's options with left/right.
pub struct SelectControl {
    props: Props,
    field: SelectField,
    index: usize,
}

impl SelectControl {
    pub fn new(field: SelectField, index: usize) -> Self {
        let len = field.options().len();
        Self {
            props: Props::default(),
            field,
            index: index.min(len.saturating_sub(1)),
        }
    }

    fn cycle(&mut self, delta: isize) {
        let len = self.field.options().len() as isize;
        if len == 0 {
            return;
        }
        self.index = ((self.index as isize + delta).rem_euclid(len)) as usize;
    }

    fn current_label(&self) -> &'static str {
        self.field
            .options()
            .get(self.index)
            .map(|(_, label)| *label)
            .unwrap_or("")
    }
}

impl MockComponent for SelectControl {
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
        let label = Paragraph::new(format!("{}:", self.field.label())).style(label_style);
        frame.render_widget(label, cols[0]);

        let arrow_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled("◂ ", arrow_style),
            Span::styled(self.current_label(), value_style),
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
        State::One(StateValue::Usize(self.index))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Left) => {
                self.cycle(-1);
                CmdResult::Changed(self.state())
            }
            Cmd::Move(CmdDirection::Right) => {
                self.cycle(1);
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for SelectControl {
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

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),

            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                self.cycle(-1);
                Some(self.field.msg(self.index))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                self.cycle(1);
                Some(self.field.msg(self.index))
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
    fn cycles_forward_and_wraps() {
        let mut control = SelectControl::new(SelectField::DotShape, 0);
        control.cycle(1);
        assert_eq!(control.index, 1);
        control.cycle(2);
        assert_eq!(control.index, 0);
        control.cycle(-1);
        assert_eq!(control.index, 2);
    }

    #[test]
    fn emits_the_matching_enum_variant() {
        assert_eq!(
            SelectField::EcLevel.msg(3),
            Msg::EcLevelChanged(EcLevel::H)
        );
        assert_eq!(
            SelectField::DotShape.msg(1),
            Msg::DotShapeChanged(DotShape::Round)
        );
    }

    #[test]
    fn out_of_range_index_falls_back_to_default() {
        assert_eq!(
            SelectField::EcLevel.msg(17),
            Msg::EcLevelChanged(EcLevel::M)
        );
    }
}
