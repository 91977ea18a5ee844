use ratatui::prelude::*;

/// Runtime theme with direct field access for all UI elements
///
/// A single built-in dark palette; everything reads its styling from here so
/// the render code stays free of literal colors.
#[derive(Debug, Clone)]
pub struct Theme {
    pub default_bg: Color,

    pub panel_title: Style,
    pub panel_border: Style,
    pub panel_border_active: Style,

    pub form_label: Style,
    pub form_value: Style,
    pub form_placeholder: Style,
    pub form_value_focused: Style,

    pub table_header: Style,
    pub table_row: Style,
    pub table_selected: Style,
    pub table_empty: Style,

    pub card_border: Style,
    pub card_title: Style,
    pub card_label: Style,
    pub card_value: Style,
    pub card_flag: Style,

    pub skeleton: Style,
    pub error_text: Style,

    pub flash_success: Style,
    pub flash_error: Style,

    pub status_key: Style,
    pub status_desc: Style,
    pub status_bar_bg: Color,

    pub confirm_text: Style,
    pub confirm_key: Style,
    pub overlay_bg: Color,

    pub help_text: Style,
    pub help_footer: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            default_bg: Color::Reset,

            panel_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_active: Style::default().fg(Color::Cyan),

            form_label: Style::default().fg(Color::Gray),
            form_value: Style::default().fg(Color::White),
            form_placeholder: Style::default().fg(Color::DarkGray),
            form_value_focused: Style::default().fg(Color::Yellow),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_selected: Style::default()
                .bg(Color::Indexed(237))
                .add_modifier(Modifier::BOLD),
            table_empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            card_label: Style::default().fg(Color::Gray),
            card_value: Style::default().fg(Color::White),
            card_flag: Style::default().fg(Color::DarkGray),

            skeleton: Style::default().fg(Color::Indexed(238)),
            error_text: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            flash_success: Style::default().fg(Color::Black).bg(Color::Green),
            flash_error: Style::default().fg(Color::White).bg(Color::Red),

            status_key: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(Color::Gray),
            status_bar_bg: Color::Indexed(235),

            confirm_text: Style::default().fg(Color::White),
            confirm_key: Style::default().fg(Color::Yellow),
            overlay_bg: Color::Indexed(236),

            help_text: Style::default().fg(Color::White),
            help_footer: Style::default().fg(Color::DarkGray),
        }
    }
}
