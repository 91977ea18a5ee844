use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use super::Theme;
use crate::models::Registration;

/// Render the registered courses table
///
/// The table is rebuilt from the book snapshot on every frame; there is no
/// incremental diffing. An empty book renders a single informational row.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    entries: &[Registration],
    selected: usize,
    active: bool,
    theme: &Theme,
) {
    let border_style = if active {
        theme.panel_border_active
    } else {
        theme.panel_border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" Registered Courses ({}) ", entries.len()),
            theme.panel_title,
        ))
        .border_style(border_style);

    if entries.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No courses registered yet.")
                .style(theme.table_empty)
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let header = Row::new(["Student", "Matric No.", "Code", "Title"]).style(theme.table_header);

    let rows = entries.iter().map(|reg| {
        Row::new([
            reg.student_name.clone(),
            reg.matric_number.clone(),
            reg.course_code.clone(),
            reg.course_title.clone(),
        ])
        .style(theme.table_row)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(26),
            Constraint::Percentage(28),
            Constraint::Length(8),
            Constraint::Percentage(34),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(theme.table_selected)
    .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(selected.min(entries.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}
