//! UI rendering with Ratatui.

use crate::selector::Selector;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

const PROMPT: &str = "Search: ";

/// Main render function: prompt line on top, candidates below.
pub fn render(frame: &mut Frame, selector: &Selector) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(frame.area());

    let input_line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(selector.query(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(input_line), chunks[0]);
    // Display width, not chars: wide glyphs take two cells. Clamped to the row.
    let typed = Span::raw(PROMPT).width() + Span::raw(selector.query()).width();
    let x = chunks[0]
        .x
        .saturating_add(u16::try_from(typed).unwrap_or(u16::MAX))
        .min(chunks[0].right().saturating_sub(1));
    frame.set_cursor_position((x, chunks[0].y));

    if selector.candidate_count() == 0 {
        let no_results = Paragraph::new("No results found")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(no_results, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = selector
        .candidates()
        .map(|title| ListItem::new(Line::from(title.to_string())))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(60, 40, 80))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selector.cursor()));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
