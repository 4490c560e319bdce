//! Extension values and the `alwayson_scripts` payload built from them

use dlayer_app::state::AppState;
use dlayer_core::ExtensionValues;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use serde_json::Value;

use super::{scroll_offset, truncate_to_width};
use crate::theme::styles;

pub struct ValuesPanel<'a> {
    state: &'a AppState,
}

impl<'a> ValuesPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// `name  [arg, arg, ...]` with args as compact JSON
    fn value_line(name: &str, args: &[Value], width: usize) -> Line<'static> {
        let args = Value::Array(args.to_vec()).to_string();
        let name = format!("{name}  ");
        let remaining = width.saturating_sub(name.chars().count());
        Line::from(vec![
            Span::styled(name, styles::text_primary()),
            Span::styled(truncate_to_width(&args, remaining), styles::accent()),
        ])
    }

    /// Pretty-printed payload for enabled extensions
    fn payload_text(&self, values: &ExtensionValues) -> Text<'static> {
        let scripts = values.alwayson_scripts(&self.state.enabled_extensions());
        if scripts.is_empty() {
            return Text::styled("No enabled extension has values", styles::text_muted());
        }
        let pretty = serde_json::to_string_pretty(&Value::Object(scripts)).unwrap_or_default();
        Text::styled(pretty, styles::text_secondary())
    }

    fn render_message(area: Rect, buf: &mut Buffer, message: String) {
        let block = styles::glass_block(true).title(Span::styled(" Values ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(Line::styled(message, styles::text_muted()))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

impl Widget for ValuesPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let values = match &self.state.values {
            Some(values) if values.active => values,
            _ => {
                let message = if self.state.values_loading {
                    "Loading...".to_string()
                } else {
                    self.state.status_line()
                };
                Self::render_message(area, buf, message);
                return;
            }
        };

        let [list_area, payload_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

        // Left: one row per extension
        let block = styles::glass_block(true).title(Span::styled(" Values ", styles::accent_bold()));
        let inner = block.inner(list_area);
        block.render(list_area, buf);

        let height = inner.height as usize;
        let start = scroll_offset(self.state.values_scroll, values.values.len(), height);
        for (offset, (name, args)) in values.values.iter().skip(start).take(height).enumerate() {
            let y = inner.y + offset as u16;
            let line = Self::value_line(name, &args.args, inner.width as usize);
            buf.set_line(inner.x, y, &line, inner.width);
            if start + offset == self.state.values_scroll {
                buf.set_style(
                    Rect::new(inner.x, y, inner.width, 1),
                    styles::selected_row().add_modifier(Modifier::BOLD),
                );
            }
        }

        // Right: alwayson_scripts preview
        let block = styles::glass_block(false).title(Span::styled(
            " alwayson_scripts ",
            styles::text_secondary(),
        ));
        Paragraph::new(self.payload_text(values))
            .block(block)
            .render(payload_area, buf);
    }
}
