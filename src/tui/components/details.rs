//! Design details Component: build facts and warnings with scrolling.

use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::tui::AppAction;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::model::{DesignNote, NoteLevel};
use crate::tui::{dispatcher, handle_global_app_events};

/// Scrollable list of notes produced by the last regeneration.
pub struct Details {
    props: Props,
    notes: Vec<DesignNote>,
    scroll: u16,
    wrap_width: usize,
}

impl Details {
    pub fn new() -> Self {
        Self {
            props: Props::default(),
            notes: Vec::new(),
            scroll: 0,
            wrap_width: 40,
        }
    }

    pub fn set_notes(&mut self, notes: Vec<DesignNote>) {
        self.notes = notes;
        // Reset scroll when data changes
        self.scroll = 0;
    }

    /// Icon and style per note level.
    fn level_style(level: NoteLevel) -> (&'static str, Style) {
        match level {
            NoteLevel::Info => ("✓", Style::default().fg(Color::Green)),
            NoteLevel::Warning => ("⚠", Style::default().fg(Color::Yellow)),
            NoteLevel::Error => ("✗", Style::default().fg(Color::Red)),
        }
    }

    fn content_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let body_width = self.wrap_width.saturating_sub(2).max(8);

        for note in &self.notes {
            let (icon, style) = Self::level_style(note.level);
            let wrapped = textwrap::wrap(&note.text, body_width);
            for (i, piece) in wrapped.iter().enumerate() {
                let prefix = if i == 0 { format!("{icon} ") } else { "  ".to_string() };
                lines.push(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::raw(piece.to_string()),
                ]));
            }
        }

        lines
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self, max: u16) {
        self.scroll = (self.scroll + 1).min(max);
    }
}

impl Default for Details {
    fn default() -> Self {
        Self::new()
    }
}

impl MockComponent for Details {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let block = Block::default()
            .title(" Details ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.wrap_width = inner.width as usize;

        if self.notes.is_empty() {
            let msg = Paragraph::new(Span::styled(
                "Nothing generated yet",
                Style::default().add_modifier(Modifier::DIM),
            ));
            frame.render_widget(msg, inner);
            return;
        }

        let lines = self.content_lines();
        let content_height = lines.len() as u16;
        let visible_height = inner.height;
        let needs_scroll = content_height > visible_height;

        let paragraph = Paragraph::new(lines).scroll((self.scroll, 0));
        frame.render_widget(paragraph, inner);

        if needs_scroll {
            let max_scroll = content_height.saturating_sub(visible_height);
            let mut scrollbar_state =
                ScrollbarState::new(max_scroll as usize).position(self.scroll as usize);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
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
        State::One(StateValue::U16(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => {
                self.scroll_up();
                CmdResult::Changed(self.state())
            }
            Cmd::Scroll(CmdDirection::Down) => {
                let lines = self.content_lines();
                let max = lines.len().saturating_sub(1) as u16;
                self.scroll_down(max);
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for Details {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        if !focused {
            return None;
        }

        // Extract keyboard event
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Use dispatcher to convert to semantic action
        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            // Focus navigation
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),

            // Scrolling
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Scroll(CmdDirection::Up));
                Some(Msg::DetailsScrollUp)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Scroll(CmdDirection::Down));
                Some(Msg::DetailsScrollDown)
            }

            _ => None,
        }
    }
}
