use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;
use crate::app::App;
use crate::popup::{result_label, Popup};

pub(crate) fn render_popup(frame: &mut Frame, app: &App, popup: &Popup, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    match popup {
        Popup::Search { query } | Popup::Searching { query } => {
            let searching = matches!(popup, Popup::Searching { .. });
            let title = if searching {
                " Searching... "
            } else {
                " Enter drink brand and name "
            };
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.accent()))
                .style(Style::default().bg(app.theme.bg()));
            let inner = block.inner(popup_area);
            frame.render_widget(block, popup_area);

            let cursor = if searching { "" } else { "█" };
            let lines = vec![
                Line::from(vec![
                    Span::styled(">> ", Style::default().fg(app.theme.accent())),
                    Span::styled(format!("{query}{cursor}"), Style::default().fg(app.theme.fg())),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    "  Enter: search  Esc: cancel",
                    Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        }
        Popup::Results { drinks, selected } => {
            let block = Block::default()
                .title(" Select desired drink... ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.accent()))
                .style(Style::default().bg(app.theme.bg()));

            let items: Vec<ListItem> = drinks
                .iter()
                .map(|d| ListItem::new(Span::raw(result_label(d))))
                .collect();
            let list = List::new(items)
                .block(block)
                .style(Style::default().fg(app.theme.fg()))
                .highlight_style(
                    Style::default()
                        .bg(app.theme.selection_bg())
                        .fg(app.theme.fg_bright())
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            let mut state = ListState::default().with_selected(Some(*selected));
            frame.render_stateful_widget(list, popup_area, &mut state);
        }
    }
}

pub(crate) fn render_error(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let error_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, error_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.danger()))
        .style(Style::default().bg(app.theme.bg()));

    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(app.theme.fg()))),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: close error dialog",
            Style::default().fg(app.theme.muted()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        error_area,
    );
}
