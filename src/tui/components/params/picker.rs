//! Modal color picker: saturation/value plane plus a hue bar.

use palette::{FromColor, Hsv, Srgb};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tuirealm::event::Key;
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::color::{self, Hsva};
use crate::tui::activities::{Msg, editor::UserEvent};

use super::ColorField;

/// Which part of the picker the arrows drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerPane {
    #[default]
    Plane,
    Hue,
}

/// Saturation/value step per arrow press.
const SV_STEP: f32 = 0.05;
/// Hue degrees per arrow press.
const HUE_STEP: f32 = 3.0;

/// Plane-and-hue picker for one color field. Alpha from the seeding hex
/// is preserved across edits even though the emitted hex drops it.
pub struct ColorPicker {
    props: Props,
    field: ColorField,
    hsva: Hsva,
    pane: PickerPane,
}

impl ColorPicker {
    pub fn new(field: ColorField, current: &str) -> Self {
        Self {
            props: Props::default(),
            field,
            hsva: color::hsva_or_default(current),
            pane: PickerPane::Plane,
        }
    }

    fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            PickerPane::Plane => PickerPane::Hue,
            PickerPane::Hue => PickerPane::Plane,
        };
    }

    fn msg_for_change(&self) -> Option<Msg> {
        Some(Msg::PickerColorChanged(
            self.field,
            color::hsva_to_hex(self.hsva),
        ))
    }

    fn rgb_at(&self, s: f32, v: f32) -> Color {
        let rgb: Srgb<u8> = Srgb::from_color(Hsv::new(self.hsva.h, s, v)).into_format();
        Color::Rgb(rgb.red, rgb.green, rgb.blue)
    }

    fn draw_plane(&self, frame: &mut Frame, area: Rect, focused: bool) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let cols = area.width as usize;
        let rows = area.height as usize;
        let marker_col = (self.hsva.s * (cols - 1) as f32).round() as usize;
        let marker_row = ((1.0 - self.hsva.v) * (rows - 1) as f32).round() as usize;

        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let v = 1.0 - row as f32 / (rows - 1) as f32;
            let mut spans = Vec::with_capacity(cols);
            for col in 0..cols {
                let s = col as f32 / (cols - 1) as f32;
                let bg = self.rgb_at(s, v);
                if row == marker_row && col == marker_col {
                    let fg = if v > 0.5 { Color::Black } else { Color::White };
                    let style = if focused {
                        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(fg).bg(bg)
                    };
                    spans.push(Span::styled("+", style));
                } else {
                    spans.push(Span::styled(" ", Style::default().bg(bg)));
                }
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_hue_bar(&self, frame: &mut Frame, area: Rect, focused: bool) {
        if area.width < 2 {
            return;
        }
        let cols = area.width as usize;
        let marker_col = (self.hsva.h.rem_euclid(360.0) / 360.0 * (cols - 1) as f32).round() as usize;

        let mut spans = Vec::with_capacity(cols);
        for col in 0..cols {
            let hue = col as f32 / (cols - 1) as f32 * 360.0;
            let rgb: Srgb<u8> = Srgb::from_color(Hsv::new(hue, 1.0, 1.0)).into_format();
            let bg = Color::Rgb(rgb.red, rgb.green, rgb.blue);
            if col == marker_col {
                let style = if focused {
                    Style::default()
                        .fg(Color::White)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White).bg(bg)
                };
                spans.push(Span::styled("|", style));
            } else {
                spans.push(Span::styled(" ", Style::default().bg(bg)));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl MockComponent for ColorPicker {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let title = match self.field {
            ColorField::Foreground => " Foreground color ",
            ColorField::Background => " Background color ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // current hex + swatch
                Constraint::Min(4),    // saturation/value plane
                Constraint::Length(1), // hue bar
                Constraint::Length(1), // hint
            ])
            .split(inner);

        let hex = color::hsva_to_hex(self.hsva);
        let header = Line::from(vec![
            Span::raw(format!("{hex} ")),
            Span::styled(
                "   ",
                Style::default().bg(self.rgb_at(self.hsva.s, self.hsva.v)),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        self.draw_plane(frame, rows[1], self.pane == PickerPane::Plane);
        self.draw_hue_bar(frame, rows[2], self.pane == PickerPane::Hue);

        let hint = Paragraph::new(Span::styled(
            "arrows adjust, Tab hue/plane, Enter done",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(hint, rows[3]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::Tup3((
            StateValue::F64(self.hsva.h as f64),
            StateValue::F64(self.hsva.s as f64),
            StateValue::F64(self.hsva.v as f64),
        ))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match (self.pane, cmd) {
            (PickerPane::Plane, Cmd::Move(CmdDirection::Left)) => {
                self.hsva.s = (self.hsva.s - SV_STEP).clamp(0.0, 1.0);
                CmdResult::Changed(self.state())
            }
            (PickerPane::Plane, Cmd::Move(CmdDirection::Right)) => {
                self.hsva.s = (self.hsva.s + SV_STEP).clamp(0.0, 1.0);
                CmdResult::Changed(self.state())
            }
            (PickerPane::Plane, Cmd::Move(CmdDirection::Up)) => {
                self.hsva.v = (self.hsva.v + SV_STEP).clamp(0.0, 1.0);
                CmdResult::Changed(self.state())
            }
            (PickerPane::Plane, Cmd::Move(CmdDirection::Down)) => {
                self.hsva.v = (self.hsva.v - SV_STEP).clamp(0.0, 1.0);
                CmdResult::Changed(self.state())
            }
            (PickerPane::Hue, Cmd::Move(CmdDirection::Left)) => {
                self.hsva.h = (self.hsva.h - HUE_STEP).rem_euclid(360.0);
                CmdResult::Changed(self.state())
            }
            (PickerPane::Hue, Cmd::Move(CmdDirection::Right)) => {
                self.hsva.h = (self.hsva.h + HUE_STEP).rem_euclid(360.0);
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for ColorPicker {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Modal: everything is handled here, nothing reaches the form
        match key_event.code {
            Key::Enter | Key::Esc => Some(Msg::CloseOverlay),
            Key::Tab => {
                self.toggle_pane();
                None
            }
            Key::Left => {
                if let CmdResult::Changed(_) = self.perform(Cmd::Move(CmdDirection::Left)) {
                    self.msg_for_change()
                } else {
                    None
                }
            }
            Key::Right => {
                if let CmdResult::Changed(_) = self.perform(Cmd::Move(CmdDirection::Right)) {
                    self.msg_for_change()
                } else {
                    None
                }
            }
            Key::Up => {
                if let CmdResult::Changed(_) = self.perform(Cmd::Move(CmdDirection::Up)) {
                    self.msg_for_change()
                } else {
                    None
                }
            }
            Key::Down => {
                if let CmdResult::Changed(_) = self.perform(Cmd::Move(CmdDirection::Down)) {
                    self.msg_for_change()
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn seeds_from_the_current_hex() {
        let picker = ColorPicker::new(ColorField::Foreground, "#ff0000");
        assert_relative_eq!(picker.hsva.h, 0.0);
        assert_relative_eq!(picker.hsva.s, 1.0);
        assert_relative_eq!(picker.hsva.v, 1.0);
    }

    #[test]
    fn invalid_hex_seeds_black() {
        let picker = ColorPicker::new(ColorField::Background, "not-a-color");
        assert_relative_eq!(picker.hsva.v, 0.0);
        assert_relative_eq!(picker.hsva.a, 0.0);
    }

    #[test]
    fn plane_arrows_step_saturation_and_value() {
        let mut picker = ColorPicker::new(ColorField::Foreground, "#ff0000");
        picker.perform(Cmd::Move(CmdDirection::Left));
        assert_relative_eq!(picker.hsva.s, 0.95);
        picker.perform(Cmd::Move(CmdDirection::Down));
        assert_relative_eq!(picker.hsva.v, 0.95);
        // Clamped at the top
        picker.perform(Cmd::Move(CmdDirection::Up));
        picker.perform(Cmd::Move(CmdDirection::Up));
        assert_relative_eq!(picker.hsva.v, 1.0);
    }

    #[test]
    fn hue_wraps_around_zero() {
        let mut picker = ColorPicker::new(ColorField::Foreground, "#ff0000");
        picker.toggle_pane();
        picker.perform(Cmd::Move(CmdDirection::Left));
        assert_relative_eq!(picker.hsva.h, 357.0);
        picker.perform(Cmd::Move(CmdDirection::Right));
        assert_relative_eq!(picker.hsva.h, 0.0);
    }

    #[test]
    fn alpha_survives_plane_edits() {
        let mut picker = ColorPicker::new(ColorField::Foreground, "#abcdef80");
        let seeded_alpha = picker.hsva.a;
        picker.perform(Cmd::Move(CmdDirection::Left));
        assert_relative_eq!(picker.hsva.a, seeded_alpha);
        assert!((seeded_alpha - 0.5).abs() < 0.01);
    }

    #[test]
    fn emitted_hex_tracks_the_edit() {
        let mut picker = ColorPicker::new(ColorField::Background, "#00ff00");
        picker.toggle_pane();
        picker.perform(Cmd::Move(CmdDirection::Right));
        let Some(Msg::PickerColorChanged(field, hex)) = picker.msg_for_change() else {
            panic!("expected a picker change");
        };
        assert_eq!(field, ColorField::Background);
        assert!(hex.starts_with('#'));
        assert_eq!(hex.len(), 7);
    }
}
