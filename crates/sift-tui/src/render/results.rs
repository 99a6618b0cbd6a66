//! Main results view rendering.

use crate::app::App;
use crate::colors;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use sift_core::SearchResult;

const PLACEHOLDER: &str = "Search tools, docs, links and commands...";

/// Render the palette: query input, merged result list and status bar.
// Cursor column is bounded by terminal width
#[allow(clippy::cast_possible_truncation)]
pub fn render_results_ui(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let loading = if app.loading { " searching... " } else { "" };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Sift {loading}"))
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(if app.loading {
            colors::PRIMARY
        } else {
            colors::OUTLINE
        }));

    let input_text = if app.input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(colors::OUTLINE))
    } else {
        Span::styled(&app.input, Style::default().fg(colors::ON_SURFACE))
    };
    f.render_widget(Paragraph::new(input_text).block(input_block), chunks[0]);

    let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
    f.set_cursor_position((
        chunks[0].x + Span::raw(before_cursor).width() as u16 + 1,
        chunks[0].y + 1,
    ));

    let width = chunks[1].width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| build_result_item(result, Some(i) == app.selected, width))
        .collect();

    let results_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", app.results.len()))
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));

    app.results_area = chunks[1];
    f.render_stateful_widget(List::new(items).block(results_block), chunks[1], &mut app.list_state);

    let help = Paragraph::new(Line::from(build_help_spans(app))).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(colors::SURFACE))
            .border_style(Style::default().fg(colors::OUTLINE)),
    );
    f.render_widget(help, chunks[2]);
}

/// Two lines per row: category label and title, then the excerpt
fn build_result_item(result: &SearchResult, is_selected: bool, width: usize) -> ListItem<'_> {
    let base_style = if is_selected {
        Style::default().bg(colors::SURFACE_HIGH)
    } else {
        Style::default().bg(colors::SURFACE)
    };

    let kind = result.kind();
    let label = format!("{:<10}", kind.label());
    let title_style = if is_selected {
        Style::default()
            .fg(colors::ON_SURFACE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::ON_SURFACE)
    };

    let line1 = Line::from(vec![
        Span::styled(label, Style::default().fg(colors::kind(kind))),
        Span::styled(result.title(), title_style),
    ]);

    let excerpt: String = result
        .excerpt()
        .chars()
        .take(width.saturating_sub(10))
        .collect();
    let line2 = Line::from(vec![
        Span::raw(" ".repeat(10)),
        Span::styled(excerpt, Style::default().fg(colors::SUBTEXT)),
    ]);

    ListItem::new(vec![line1, line2]).style(base_style)
}

fn build_help_spans(app: &App) -> Vec<Span<'_>> {
    let mut help_spans = vec![
        Span::styled("Esc", Style::default().fg(colors::PRIMARY)),
        Span::styled(": quit  ", Style::default().fg(colors::SUBTEXT)),
        Span::styled("Enter", Style::default().fg(colors::PRIMARY)),
        Span::styled(": open  ", Style::default().fg(colors::SUBTEXT)),
        Span::styled("Up/Down", Style::default().fg(colors::PRIMARY)),
        Span::styled(": select  ", Style::default().fg(colors::SUBTEXT)),
    ];

    if app.loading {
        help_spans.push(Span::styled(
            " [Loading...] ",
            Style::default().fg(colors::SUCCESS),
        ));
    }

    if let Some(msg) = &app.status_message {
        help_spans.push(Span::styled(msg, Style::default().fg(colors::WARNING)));
    }

    help_spans
}
