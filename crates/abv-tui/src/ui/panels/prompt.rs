use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::keys::HINTS;

pub fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let quantity = app.controller.quantity();
    let mut spans = Vec::new();
    for (key, label, q) in HINTS {
        let bg = if *q == Some(quantity) {
            app.theme.selection_bg()
        } else {
            app.theme.border()
        };
        spans.push(Span::styled(
            key.to_string(),
            Style::default().bg(bg).fg(app.theme.bg()),
        ));
        spans.push(Span::styled(
            format!("->{label} "),
            Style::default().fg(app.theme.muted()),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.mode();
    let line = Line::from(vec![
        Span::styled(
            mode.to_string(),
            Style::default()
                .bg(app.theme.mode(mode))
                .fg(app.theme.bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >> ", Style::default().fg(app.theme.fg_bright())),
        Span::styled(app.input.as_str(), Style::default().fg(app.theme.fg())),
        Span::styled("█", Style::default().fg(app.theme.accent())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
