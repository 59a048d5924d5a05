//! Drawing an instantiated screen view.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use viewstack_core::ViewNode;

use super::{Footer, Screen};
use crate::theme::Theme;

/// Render `view` into `area`.
///
/// The root node must carry a [`Screen`]; the footer is read from the first
/// child carrying a [`Footer`]. A view without a screen renders a placeholder.
pub fn render_view(frame: &mut Frame, area: Rect, view: &ViewNode, theme: &Theme) {
    let Some(screen) = view.with_behaviour::<Screen, _>(|screen| screen.clone()) else {
        let placeholder = Paragraph::new(format!("{} has nothing to show", view.name()))
            .style(Style::default().fg(theme.error))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    };
    let footer = view
        .children()
        .iter()
        .find_map(|child| child.with_behaviour::<Footer, _>(|footer| footer.clone()));

    let block = Block::default()
        .title(Span::styled(format!(" {} ", screen.title()), theme.bold))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let body = Paragraph::new(screen.body())
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let links: Vec<Line> = screen
        .links()
        .iter()
        .enumerate()
        .map(|(index, link)| {
            if index == screen.selected() {
                Line::from(Span::styled(
                    format!("> {}", link.label),
                    Style::default().fg(theme.accent).bg(theme.selection),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", link.label),
                    Style::default().fg(theme.fg),
                ))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(links), chunks[1]);

    let mut status = format!("visits: {}", screen.visits());
    if let Some(from) = screen.from() {
        status.push_str(&format!("  from: {from}"));
    }
    if let Some(footer) = footer {
        status = format!("{}  |  {status}", footer.hint());
        let style = if footer.is_leaving() {
            theme.dim
        } else {
            Style::default().fg(theme.fg)
        };
        frame.render_widget(Paragraph::new(status).style(style), chunks[2]);
    } else {
        frame.render_widget(Paragraph::new(status).style(theme.dim), chunks[2]);
    }
}
