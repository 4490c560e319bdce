//! Key binding overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use crate::layout::centered;
use crate::theme::styles;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "General",
        &[
            ("1 2 3 / Tab", "switch tab"),
            ("j k / ↑ ↓", "move"),
            ("g G / PgUp PgDn", "jump"),
            ("r", "refresh"),
            ("q / Esc", "quit"),
        ],
    ),
    (
        "Components",
        &[
            ("Enter / Space", "toggle, click or edit"),
            ("h l / ← →", "adjust by one step"),
            ("H L", "adjust by ten steps"),
            ("e / c", "expand / collapse all"),
            ("v", "sync value from backend"),
            ("X", "clear backend registry"),
        ],
    ),
];

pub struct HelpOverlay;

impl HelpOverlay {
    fn lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, (title, keys)) in BINDINGS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::styled(*title, styles::accent_bold()));
            for (key, action) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<18}"), styles::keybinding()),
                    Span::styled(*action, styles::text_secondary()),
                ]));
            }
        }
        lines
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = Self::lines();
        let height = lines.len() as u16 + 2;
        let rect = centered(50, height, area);

        Clear.render(rect, buf);
        Paragraph::new(lines)
            .block(styles::modal_block(" Keys "))
            .render(rect, buf);
    }
}
