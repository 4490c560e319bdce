//! Header with title, tab bar and backend status

use dlayer_app::config::StartTab;
use dlayer_app::state::AppState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Widget},
};

use crate::theme::{palette, styles};

/// Glass header: tab titles on the left, layer status on the right
pub struct HeaderWithTabs<'a> {
    state: &'a AppState,
}

impl<'a> HeaderWithTabs<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn tab_titles() -> Vec<Line<'static>> {
        StartTab::all()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                Line::from(vec![
                    Span::styled(format!("{}", i + 1), styles::keybinding()),
                    Span::raw(format!(" {}", tab.label())),
                ])
            })
            .collect()
    }

    fn selected_index(&self) -> usize {
        StartTab::all()
            .iter()
            .position(|t| *t == self.state.tab)
            .unwrap_or(0)
    }

    /// `● active · 12 components` / `○ inactive` / `○ disabled`
    fn layer_badge(&self) -> Line<'static> {
        if !self.state.layer_enabled() {
            return Line::from(Span::styled("○ disabled", styles::text_muted()));
        }
        match &self.state.status {
            Some(status) if status.active => Line::from(vec![
                Span::styled("● ", Style::default().fg(palette::STATUS_GREEN)),
                Span::styled("active", styles::text_secondary()),
                Span::styled(
                    format!(" · {} components", status.component_count),
                    styles::text_muted(),
                ),
            ]),
            Some(_) => Line::from(vec![
                Span::styled("○ ", Style::default().fg(palette::STATUS_YELLOW)),
                Span::styled("inactive", styles::text_secondary()),
            ]),
            None => Line::from(Span::styled("○ unknown", styles::text_muted())),
        }
    }
}

impl Widget for HeaderWithTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(Span::styled(" dlayer ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let badge = self.layer_badge();
        let badge_width = (badge.width() as u16 + 1).min(inner.width);
        let [tabs_area, badge_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(badge_width)]).areas(inner);

        Tabs::new(Self::tab_titles())
            .select(self.selected_index())
            .style(styles::text_secondary())
            .highlight_style(styles::focused_selected())
            .divider(Span::styled("│", styles::text_muted()))
            .render(tabs_area, buf);

        Paragraph::new(badge).render(badge_area, buf);
    }
}
