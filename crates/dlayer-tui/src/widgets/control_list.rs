//! Component tree panel
//!
//! Draws the extension sections and their rendered controls as an indented
//! list, one row per [`ViewRow`]. Section headers carry the compatibility
//! color; controls show their current bound value.

use dlayer_app::renderer::control::slider_text;
use dlayer_app::renderer::{Control, ControlKind, Orientation};
use dlayer_app::state::{LayerViewState, LoadState};
use dlayer_app::{ExtensionSection, ViewRow};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{scroll_offset, truncate_to_width};
use crate::theme::{palette, styles};

const SLIDER_WIDTH: usize = 16;

/// Format a number without a trailing `.0` for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Text gauge for a slider, e.g. `━━━━━━──────────`
pub fn slider_bar(minimum: f64, maximum: f64, value: f64, width: usize) -> String {
    let span = maximum - minimum;
    let ratio = if span > 0.0 {
        ((value - minimum) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "━".repeat(filled), "─".repeat(width - filled))
}

/// Widget listing the rendered controls of the component view
pub struct ControlList<'a> {
    layer: &'a LayerViewState,
    focused: bool,
}

impl<'a> ControlList<'a> {
    pub fn new(layer: &'a LayerViewState) -> Self {
        Self {
            layer,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn section_line(section: &ExtensionSection) -> Line<'static> {
        let marker = if section.expanded { "▼" } else { "▶" };
        let mut spans = vec![
            Span::styled(format!("{marker} "), styles::accent()),
            Span::styled(section.header(), styles::compatibility(section.compatibility)),
        ];
        if !section.unsupported_types.is_empty() {
            spans.push(Span::styled(
                format!("  unsupported: {}", section.unsupported_types.join(", ")),
                styles::text_muted(),
            ));
        }
        Line::from(spans)
    }

    /// Spans for one control; `edit` is the live buffer when this control is
    /// being edited.
    fn control_spans(control: &Control, edit: Option<&str>) -> Vec<Span<'static>> {
        let label_style = if control.enabled {
            styles::text_primary()
        } else {
            styles::text_muted()
        };
        let value_style = if control.enabled {
            styles::accent()
        } else {
            styles::text_muted()
        };

        let mut spans = match &control.kind {
            ControlKind::Container { orientation } => {
                let glyph = match orientation {
                    Orientation::Horizontal => "⇆",
                    Orientation::Vertical => "⇅",
                };
                vec![Span::styled(
                    format!("{glyph} {}", control.kind.display_label()),
                    styles::text_muted(),
                )]
            }
            ControlKind::Group => vec![Span::styled("▣ Group", styles::text_muted())],
            ControlKind::Accordion { label, expanded } => {
                let marker = if *expanded { "▼" } else { "▶" };
                vec![Span::styled(format!("{marker} {label}"), label_style)]
            }
            ControlKind::InputAccordion { label, checked } => vec![
                Span::styled(checkbox_mark(*checked), value_style),
                Span::styled(format!(" {label}"), label_style),
            ],
            // Panels are never listed
            ControlKind::Panel { .. } => Vec::new(),
            ControlKind::Button { label } => vec![Span::styled(
                format!("[ {label} ]"),
                value_style.add_modifier(Modifier::BOLD),
            )],
            ControlKind::TextBox {
                label,
                placeholder,
                text,
                multiline,
            } => {
                let mut spans = Vec::new();
                if let Some(label) = label {
                    spans.push(Span::styled(format!("{label}: "), label_style));
                }
                match edit {
                    Some(buffer) => spans.push(edit_span(buffer)),
                    None if text.is_empty() => spans.push(Span::styled(
                        placeholder.clone().unwrap_or_default(),
                        styles::text_muted().add_modifier(Modifier::ITALIC),
                    )),
                    None if *multiline => {
                        spans.push(Span::styled(text.replace('\n', " ⏎ "), value_style))
                    }
                    None => spans.push(Span::styled(text.clone(), value_style)),
                }
                spans
            }
            ControlKind::Slider {
                label,
                minimum,
                maximum,
                value,
                ..
            } => vec![
                Span::styled(slider_text(label, *value), label_style),
                Span::raw(" "),
                Span::styled(
                    slider_bar(*minimum, *maximum, *value, SLIDER_WIDTH),
                    if control.enabled {
                        Style::default().fg(palette::SLIDER_FILL)
                    } else {
                        Style::default().fg(palette::SLIDER_TRACK)
                    },
                ),
            ],
            ControlKind::Checkbox { label, checked } => vec![
                Span::styled(checkbox_mark(*checked), value_style),
                Span::styled(format!(" {label}"), label_style),
            ],
            ControlKind::Dropdown {
                label,
                choices,
                selected,
            } => {
                let current = selected
                    .and_then(|i| choices.get(i))
                    .map(|c| c.label.as_str())
                    .unwrap_or("none");
                vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::styled(format!("‹{current}›"), value_style),
                ]
            }
            ControlKind::Number { label, value } => vec![
                Span::styled(format!("{label}: "), label_style),
                match edit {
                    Some(buffer) => edit_span(buffer),
                    None => Span::styled(format_number(*value), value_style),
                },
            ],
            ControlKind::Placeholder { reason, .. } => {
                let mut spans = vec![Span::styled(
                    format!("┆ {} ┆", control.kind.display_label()),
                    styles::placeholder(),
                )];
                if let Some(reason) = reason {
                    spans.push(Span::styled(format!(" {reason}"), styles::text_muted()));
                }
                spans
            }
        };

        if !control.enabled && control.kind.is_interactive() {
            spans.push(Span::styled(" (disabled)", styles::text_muted()));
        }
        spans
    }

    fn row_line(&self, row: ViewRow) -> Line<'static> {
        let view = &self.layer.view;
        match row {
            ViewRow::Section(index) => view
                .sections
                .get(index)
                .map(Self::section_line)
                .unwrap_or_default(),
            ViewRow::Control { id, depth } => {
                let Some(control) = view.controls.get(id) else {
                    return Line::default();
                };
                let edit = self
                    .layer
                    .editing
                    .as_ref()
                    .filter(|e| e.control == id)
                    .map(|e| e.buffer.as_str());

                let mut spans = vec![Span::raw("  ".repeat(depth))];
                spans.extend(Self::control_spans(control, edit));
                Line::from(spans)
            }
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let message = self.layer.status_line();
        let style = match self.layer.load {
            LoadState::Loaded => styles::text_muted(),
            _ => styles::load_state(&self.layer.load),
        };
        Paragraph::new(Line::styled(message, style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for ControlList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(Span::styled(
            " Components ",
            styles::accent_bold(),
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = self.layer.rows();
        if rows.is_empty() {
            self.render_empty(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let start = scroll_offset(self.layer.selected, rows.len(), height);
        let max_width = inner.width as usize;

        for (offset, row) in rows.iter().skip(start).take(height).enumerate() {
            let y = inner.y + offset as u16;
            let is_selected = start + offset == self.layer.selected;

            if is_selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), styles::selected_row());
            }

            let line = fit_line(self.row_line(*row), max_width);
            buf.set_line(inner.x, y, &line, inner.width);

            if is_selected {
                buf.set_style(
                    Rect::new(inner.x, y, inner.width, 1),
                    Style::default().add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}

fn checkbox_mark(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn edit_span(buffer: &str) -> Span<'static> {
    Span::styled(format!("{buffer}▏"), styles::edit_buffer())
}

/// Cut a line to `max_width` columns, truncating the span that overflows
fn fit_line(line: Line<'static>, max_width: usize) -> Line<'static> {
    if line.width() <= max_width {
        return line;
    }

    let mut used = 0;
    let mut spans = Vec::new();
    for span in line.spans {
        let width = span.width();
        if used + width <= max_width {
            used += width;
            spans.push(span);
            continue;
        }
        let text = truncate_to_width(&span.content, max_width - used);
        spans.push(Span::styled(text, span.style));
        break;
    }
    Line::from(spans)
}
