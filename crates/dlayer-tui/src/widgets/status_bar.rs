//! Status bar widget
//!
//! One line: the status text of the current tab (load state plus any notice)
//! on the left, key hints on the right.

use dlayer_app::config::StartTab;
use dlayer_app::state::AppState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::truncate_to_width;
use crate::theme::{palette, styles};

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status_style(&self) -> Style {
        if self.state.notice.is_some() {
            return Style::default().fg(palette::STATUS_YELLOW);
        }
        match self.state.tab {
            StartTab::Components => styles::load_state(&self.state.layer.load),
            _ => styles::text_secondary(),
        }
    }

    /// Key hints for the current mode
    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.state.is_editing() {
            return vec![("Enter", "apply"), ("Esc", "cancel")];
        }
        let mut hints = Vec::new();
        if self.state.tab == StartTab::Components {
            hints.push(("←/→", "adjust"));
            hints.push(("Enter", "activate"));
        }
        hints.push(("r", "refresh"));
        hints.push(("?", "help"));
        hints.push(("q", "quit"));
        hints
    }

    fn hints_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, action)) in self.hints().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", styles::text_muted()));
            }
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {action}"), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = self.hints_line();
        let hints_width = (hints.width() as u16).min(area.width / 2);
        let [status_area, hints_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

        let status = truncate_to_width(
            &self.state.status_line(),
            status_area.width.saturating_sub(1) as usize,
        );
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(status, self.status_style()),
        ]))
        .render(status_area, buf);

        Paragraph::new(hints)
            .alignment(Alignment::Right)
            .render(hints_area, buf);
    }
}
