use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::logging::FlashMessage;

/// Render flash banners stacked in the bottom-right corner of `area`
///
/// Newest messages sit at the bottom. A message past its visible window but
/// still inside the fade phase renders dimmed; pruning happens in the app
/// tick, only after the fade completes.
pub fn render_flashes(
    frame: &mut Frame,
    area: Rect,
    flashes: &[FlashMessage],
    visible_ms: u64,
    theme: &Theme,
) {
    if flashes.is_empty() || area.height < 3 {
        return;
    }

    let max_rows = (area.height - 2) as usize;
    let shown = &flashes[flashes.len().saturating_sub(max_rows)..];

    for (i, flash) in shown.iter().enumerate() {
        let text = format!(" {} {} ", flash.icon(), flash.message);
        let width = (text.chars().count() as u16).min(area.width.saturating_sub(2));
        if width == 0 {
            continue;
        }

        let rect = Rect {
            x: area.x + area.width - 1 - width,
            y: area.y + area.height - 1 - (shown.len() - i) as u16,
            width,
            height: 1,
        };

        let mut style = match flash.level {
            log::Level::Error | log::Level::Warn => theme.flash_error,
            _ => theme.flash_success,
        };

        // Fade phase: visible window elapsed, removal pending
        if flash.timestamp.elapsed().as_millis() > visible_ms as u128 {
            style = style.add_modifier(Modifier::DIM);
        }

        frame.render_widget(Paragraph::new(text).style(style), rect);
    }
}
