//! QR matrix preview component.

use palette::Srgb;
use ratatui::Frame;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::color;
use crate::qr::QrOutcome;
use crate::tui::activities::{Msg, editor::UserEvent};
use crate::tui::model::Model;

/// Preview component drawing the module matrix with half blocks, so each
/// text row covers two module rows.
pub struct Preview {
    props: Props,
    outcome: Option<QrOutcome>,
    foreground: Color,
    background: Color,
    quiet: usize,
}

impl Preview {
    pub fn new() -> Self {
        Self {
            props: Props::default(),
            outcome: None,
            foreground: Color::Black,
            background: Color::White,
            quiet: 0,
        }
    }

    /// Build a preview reflecting the model's current outcome and colors.
    pub fn from_model(model: &Model) -> Self {
        let mut preview = Self::new();
        preview.outcome = model.outcome.clone();
        let fg = color::parse_or(&model.design.foreground, Srgb::new(0, 0, 0));
        preview.foreground = color::to_tui(fg);
        preview.background = if model.design.transparent {
            Color::Reset
        } else {
            let bg = color::parse_or(&model.design.background, Srgb::new(255, 255, 255));
            color::to_tui(bg)
        };
        let quiet = model.design.quiet_zone;
        preview.quiet = if quiet.is_finite() && quiet > 0.0 {
            quiet.round() as usize
        } else {
            0
        };
        preview
    }

    /// Color of the cell at matrix coordinates including the quiet ring.
    fn cell(&self, outcome: &QrOutcome, x: isize, y: isize) -> Color {
        let dark = x >= 0 && y >= 0 && outcome.is_dark(x as usize, y as usize);
        if dark { self.foreground } else { self.background }
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::new()
    }
}

impl MockComponent for Preview {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Preview ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(outcome) = &self.outcome else {
            let msg = Paragraph::new("No QR generated");
            frame.render_widget(msg, inner);
            return;
        };

        let side = outcome.width + 2 * self.quiet;
        let rows = side.div_ceil(2);
        let offset_x = (inner.width as usize).saturating_sub(side) / 2;
        let offset_y = (inner.height as usize).saturating_sub(rows) / 2;

        let mut lines = Vec::with_capacity(rows.min(inner.height as usize) + offset_y);
        for _ in 0..offset_y {
            lines.push(Line::from(""));
        }
        for row in 0..rows.min(inner.height as usize) {
            let mut spans = Vec::with_capacity(side + 1);
            if offset_x > 0 {
                spans.push(Span::raw(" ".repeat(offset_x)));
            }
            for col in 0..side.min(inner.width as usize) {
                let x = col as isize - self.quiet as isize;
                let y_top = (row * 2) as isize - self.quiet as isize;
                let y_bot = y_top + 1;
                let top = self.cell(outcome, x, y_top);
                let bot = if (row * 2 + 1) < side {
                    self.cell(outcome, x, y_bot)
                } else {
                    Color::Reset
                };
                spans.push(Span::styled("▀", Style::default().fg(top).bg(bot)));
            }
            lines.push(Line::from(spans));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for Preview {
    fn on(&mut self, _ev: Event<UserEvent>) -> Option<Msg> {
        // Read-only component
        None
    }
}
