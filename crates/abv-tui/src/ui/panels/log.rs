use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()));
    let inner = block.inner(area);

    let mut lines: Vec<Line> = Vec::new();
    for entry in app.controller.activity().visible(app.log_level()) {
        let tag = Style::default()
            .fg(app.theme.level(entry.level))
            .add_modifier(Modifier::BOLD);
        let mut first = true;
        for text in entry.message.lines() {
            let prefix = if first {
                Span::styled(format!("{} ", entry.level), tag)
            } else {
                Span::raw("     ")
            };
            first = false;
            lines.push(Line::from(vec![
                prefix,
                Span::styled(text.to_string(), Style::default().fg(app.theme.fg())),
            ]));
        }
    }

    // Keep the newest messages in view.
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}
