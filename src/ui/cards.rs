use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;
use crate::app::Dashboard;
use crate::models::Country;

/// Height of one country card, borders included
const CARD_HEIGHT: u16 = 6;

/// Number of skeleton placeholders shown while a fetch is in flight
const SKELETON_COUNT: usize = 4;

/// Render the dashboard panel for whatever state the fetch cycle is in
pub fn render_dashboard(frame: &mut Frame, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let title = match dashboard {
        Dashboard::Loading => " Live Country Dashboard — loading… ",
        _ => " Live Country Dashboard ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, theme.panel_title))
        .border_style(theme.panel_border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match dashboard {
        Dashboard::Idle => {
            frame.render_widget(
                Paragraph::new("Press r to load dashboard data.")
                    .style(theme.help_footer)
                    .alignment(Alignment::Center),
                inner,
            );
        }
        Dashboard::Loading => render_skeletons(frame, inner, theme),
        Dashboard::Failed(message) => {
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .style(theme.error_text)
                    .alignment(Alignment::Center)
                    .wrap(ratatui::widgets::Wrap { trim: true }),
                inner,
            );
        }
        Dashboard::Ready(countries) => {
            if countries.is_empty() {
                frame.render_widget(
                    Paragraph::new("No country data available.")
                        .style(theme.help_footer)
                        .alignment(Alignment::Center),
                    inner,
                );
            } else {
                render_cards(frame, inner, countries, theme);
            }
        }
    }
}

/// Placeholder outlines that stand in for cards during a fetch
fn render_skeletons(frame: &mut Frame, area: Rect, theme: &Theme) {
    for (slot, rect) in card_grid(area, SKELETON_COUNT).into_iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.skeleton);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        // A bar of blocks roughly where the country name goes
        let bar_width = (inner.width.saturating_sub(2)).min(12 + (slot as u16 % 3) * 3);
        let bar: String = "▒".repeat(bar_width as usize);
        frame.render_widget(Paragraph::new(bar).style(theme.skeleton), inner);
    }
}

/// Two-column grid of country cards
fn render_cards(frame: &mut Frame, area: Rect, countries: &[Country], theme: &Theme) {
    for (country, rect) in countries.iter().zip(card_grid(area, countries.len())) {
        render_card(frame, rect, country, theme);
    }
}

/// Compute card rectangles in a two-column grid, top to bottom
///
/// Cards that would not fit in the area are simply not returned; the grid
/// never overflows the panel.
fn card_grid(area: Rect, count: usize) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(count);
    let column_width = area.width / 2;

    if column_width < 10 {
        return rects;
    }

    for i in 0..count {
        let col = (i % 2) as u16;
        let row = (i / 2) as u16;
        let y = area.y + row * CARD_HEIGHT;

        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }

        rects.push(Rect {
            x: area.x + col * column_width,
            y,
            width: column_width,
            height: CARD_HEIGHT,
        });
    }

    rects
}

fn render_card(frame: &mut Frame, area: Rect, country: &Country, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", country.name),
            theme.card_title,
        ))
        .border_style(theme.card_border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let data_row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), theme.card_label),
            Span::styled(value, theme.card_value),
        ])
    };

    let lines = vec![
        data_row("Region:", country.region.clone()),
        data_row("Capital:", country.capital_display().to_string()),
        data_row("Population:", country.population_display()),
        Line::from(Span::styled(
            truncate(&country.flag, inner.width as usize),
            theme.card_flag,
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Clip a string to `max` characters with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let clipped: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{clipped}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_grid_fits_area() {
        let area = Rect::new(0, 0, 60, 18);
        let rects = card_grid(area, 8);

        // 18 rows fit three card rows of two columns
        assert_eq!(rects.len(), 6);
        assert!(rects.iter().all(|r| r.bottom() <= area.bottom()));
        assert!(rects.iter().all(|r| r.right() <= area.right()));
    }

    #[test]
    fn test_card_grid_narrow_area_renders_nothing() {
        let area = Rect::new(0, 0, 12, 30);
        assert!(card_grid(area, 8).is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-url", 8), "a-very-…");
    }
}
