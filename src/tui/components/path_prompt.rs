//! Modal path prompt Component for logo and export file paths.

use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::components::line_edit::LineBuffer;

/// What the prompted path is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPromptKind {
    Logo,
    Export,
}

/// Modal single-line path input. Swallows all keys while mounted.
pub struct PathPrompt {
    props: Props,
    kind: PathPromptKind,
    buffer: LineBuffer,
}

impl PathPrompt {
    pub fn new(kind: PathPromptKind, initial: &str) -> Self {
        Self {
            props: Props::default(),
            kind,
            buffer: LineBuffer::new(initial),
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            PathPromptKind::Logo => " Logo image path ",
            PathPromptKind::Export => " Export path ",
        }
    }

    fn submit_msg(&self) -> Msg {
        let path = self.buffer.text().trim().to_string();
        match self.kind {
            PathPromptKind::Logo => Msg::LogoPathSubmitted(path),
            PathPromptKind::Export => Msg::ExportPathSubmitted(path),
        }
    }
}

impl MockComponent for PathPrompt {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let line = self.buffer.spans(rows[0].width as usize, true);
        frame.render_widget(Paragraph::new(line), rows[0]);

        let hint = Paragraph::new(Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(hint, rows[1]);
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

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for PathPrompt {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Modal text entry: raw keys only, no dispatcher
        match key_event.code {
            tuirealm::event::Key::Enter => Some(self.submit_msg()),
            tuirealm::event::Key::Esc => Some(Msg::CloseOverlay),
            tuirealm::event::Key::Backspace => {
                self.buffer.backspace();
                None
            }
            tuirealm::event::Key::Delete => {
                self.buffer.delete();
                None
            }
            tuirealm::event::Key::Left => {
                self.buffer.left();
                None
            }
            tuirealm::event::Key::Right => {
                self.buffer.right();
                None
            }
            tuirealm::event::Key::Home => {
                self.buffer.home();
                None
            }
            tuirealm::event::Key::End => {
                self.buffer.end();
                None
            }
            tuirealm::event::Key::Char(c) => {
                self.buffer.insert(c);
                None
            }
            _ => None,
        }
    }
}
