use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use super::{Theme, centered_rect};

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("j / k, ↓ / ↑", "Move through the course table"),
    ("Home / End", "Jump to first / last row"),
    ("a, i", "Open the registration form"),
    ("Tab / Shift-Tab", "Next / previous form field"),
    ("Enter", "Register the course (in the form)"),
    ("d", "Delete the selected course (asks first)"),
    ("D", "Clear all registered courses (asks first)"),
    ("r", "Refresh the country dashboard"),
    ("c", "Dismiss flash messages"),
    ("q, Esc", "Quit"),
];

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(60, 70, area);

    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![
        Line::from(Span::styled(
            "regbook keys",
            theme.help_text.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (keys, description) in HELP_ENTRIES {
        lines.push(Line::from(vec![
            Span::styled(format!("{keys:<16}"), theme.status_key),
            Span::styled(*description, theme.help_text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press any key to close",
        theme.help_footer,
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .style(Style::default().bg(theme.overlay_bg))
            .padding(Padding::uniform(2)),
    );

    frame.render_widget(paragraph, overlay_area);
}
