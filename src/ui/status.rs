use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::app::AppMode;

const NORMAL_HINTS: &[(&[&str], &str)] = &[
    (&["j", "k"], "move"),
    (&["a"], "add course"),
    (&["d"], "delete"),
    (&["D"], "clear all"),
    (&["r"], "refresh data"),
    (&["c"], "dismiss toasts"),
    (&["?"], "help"),
    (&["q"], "quit"),
];

const FORM_HINTS: &[(&[&str], &str)] = &[
    (&["Tab"], "next field"),
    (&["Shift-Tab"], "previous field"),
    (&["Enter"], "register"),
    (&["Esc"], "back"),
];

const CONFIRM_HINTS: &[(&[&str], &str)] = &[
    (&["y"], "confirm"),
    (&["n", "Esc"], "cancel"),
];

const HELP_HINTS: &[(&[&str], &str)] = &[(&["any key"], "close help")];

/// Render keyboard hints bar showing mode-specific shortcuts
pub fn render_keyboard_hints(frame: &mut Frame, area: Rect, mode: AppMode, theme: &Theme) {
    let hint_data = match mode {
        AppMode::Normal => NORMAL_HINTS,
        AppMode::Form => FORM_HINTS,
        AppMode::Confirm => CONFIRM_HINTS,
        AppMode::Help => HELP_HINTS,
    };

    let mut hints = Vec::new();

    for (keys, description) in hint_data {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled(
                    "/",
                    theme.status_desc.add_modifier(Modifier::DIM),
                ));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let paragraph =
        Paragraph::new(Line::from(hints)).style(theme.status_desc.bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}
