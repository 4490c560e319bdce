//! Installed extensions with their translation layer compatibility

use dlayer_app::ExtensionSummary;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{scroll_offset, truncate_to_width};
use crate::theme::styles;

/// Rows per extension: header, then detail
const ROWS_PER_ENTRY: usize = 2;

pub struct ExtensionList<'a> {
    extensions: &'a [ExtensionSummary],
    selected: usize,
    loading: bool,
}

impl<'a> ExtensionList<'a> {
    pub fn new(extensions: &'a [ExtensionSummary], selected: usize) -> Self {
        Self {
            extensions,
            selected,
            loading: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn entry_lines(extension: &ExtensionSummary) -> [Line<'static>; ROWS_PER_ENTRY] {
        let header_style = if extension.enabled {
            styles::compatibility(extension.compatibility)
        } else {
            styles::text_muted()
        };

        let mut detail = vec![Span::styled(
            format!("    {}", extension.detail()),
            styles::text_muted(),
        )];
        if !extension.unsupported_types.is_empty() {
            detail.push(Span::styled(
                format!("  unsupported: {}", extension.unsupported_types.join(", ")),
                styles::text_secondary(),
            ));
        }

        [
            Line::styled(extension.header(), header_style),
            Line::from(detail),
        ]
    }
}

impl Widget for ExtensionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(Span::styled(" Extensions ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.extensions.is_empty() {
            let message = if self.loading {
                "Loading..."
            } else {
                "No extensions reported by the backend"
            };
            Paragraph::new(Line::styled(message, styles::text_muted()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let visible_entries = (inner.height as usize / ROWS_PER_ENTRY).max(1);
        let start = scroll_offset(self.selected, self.extensions.len(), visible_entries);
        let width = inner.width as usize;

        let mut y = inner.y;
        for (offset, extension) in self.extensions.iter().skip(start).enumerate() {
            let is_selected = start + offset == self.selected;
            for line in Self::entry_lines(extension) {
                if y >= inner.bottom() {
                    return;
                }
                let text_width = line.width();
                let line = if text_width > width {
                    Line::styled(truncate_to_width(&line.to_string(), width), line.style)
                } else {
                    line
                };
                buf.set_line(inner.x, y, &line, inner.width);
                if is_selected {
                    buf.set_style(
                        Rect::new(inner.x, y, inner.width, 1),
                        styles::selected_row().add_modifier(Modifier::BOLD),
                    );
                }
                y += 1;
            }
        }
    }
}
