use crate::colors;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BINDINGS: &[(&str, &str)] = &[
    ("Up / C-p", "previous result"),
    ("Down / C-n", "next result"),
    ("Enter", "open selected"),
    ("Left / Right", "move cursor"),
    ("C-u", "clear query"),
    ("C-d", "forget selected recent"),
    ("Mouse", "hover / click a row"),
    ("Esc", "close help, then quit"),
];

/// Key binding overlay, toggled by the "Toggle help" command
pub fn render_help_overlay(f: &mut Frame) {
    let area = f.area();
    #[allow(clippy::cast_possible_truncation)] // a handful of fixed rows
    let dialog_height = (BINDINGS.len() as u16 + 2).min(area.height);
    let dialog_width = 44.min(area.width.saturating_sub(4));
    let dialog_x = (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, dialog_height);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .style(Style::default().bg(colors::SURFACE_HIGH))
        .border_style(Style::default().fg(colors::PRIMARY));

    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<14}"), Style::default().fg(colors::PRIMARY)),
                Span::styled(*what, Style::default().fg(colors::SUBTEXT)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
