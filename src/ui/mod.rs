pub mod cards;
pub mod form;
pub mod help;
pub mod layout;
pub mod status;
pub mod table;
pub mod terminal;
pub mod theme;
pub mod toast;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

pub use cards::render_dashboard;
pub use form::{FormField, RegistrationForm, render_form};
pub use help::render_help_overlay;
pub use layout::{centered_rect, create_main_layout};
pub use status::render_keyboard_hints;
pub use table::render_table;
pub use theme::Theme;
pub use toast::render_flashes;

/// Render the vertical divider between the registrations and dashboard panels
pub fn render_divider(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = (0..area.height)
        .map(|_| Line::from(Span::styled("│", theme.panel_border)))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render confirmation dialog overlay for destructive actions
pub fn render_confirm_overlay(frame: &mut Frame, area: Rect, prompt: &str, theme: &Theme) {
    let overlay_area = centered_rect(50, 20, area);

    frame.render_widget(Clear, overlay_area);

    let message = vec![
        Line::from(""),
        Line::from(Span::styled(
            prompt.to_string(),
            theme.confirm_text.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme.confirm_key.add_modifier(Modifier::BOLD)),
            Span::styled(" - Yes  ", theme.confirm_text),
            Span::styled("n", theme.confirm_key.add_modifier(Modifier::BOLD)),
            Span::styled(" - No, cancel", theme.confirm_text),
        ]),
    ];

    let paragraph = Paragraph::new(message)
        .block(
            Block::default()
                .style(Style::default().bg(theme.overlay_bg))
                .padding(ratatui::widgets::Padding::uniform(2)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(paragraph, overlay_area);
}
