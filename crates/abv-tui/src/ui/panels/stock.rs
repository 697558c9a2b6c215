use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use abv_core::StockedDrink;

use crate::app::App;

const NAME_WIDTH: usize = 30;
const PAD: &str = "                                       ";

/// Text rows for one stocked drink. Long names wrap onto a second row
/// aligned under the name column.
pub(crate) fn drink_rows(drink: &StockedDrink) -> Vec<String> {
    let d = &drink.drink;
    let name: Vec<char> = d.name.chars().collect();
    if name.len() < NAME_WIDTH {
        return vec![format!("{:<4}{:<35}{:<30}", drink.quantity, d.brand, d.name)];
    }
    let (head, tail): (String, String) = (
        name[..NAME_WIDTH].iter().collect(),
        name[NAME_WIDTH..].iter().collect(),
    );
    vec![
        format!("{:<4}{:<35}{}...", drink.quantity, d.brand, head),
        format!("{PAD}...{tail}"),
    ]
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Stock ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()));
    let inner = block.inner(area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "Total Drinks: {}     Total Varieties: {}",
                app.total_quantity, app.total_variety
            ),
            Style::default()
                .fg(app.theme.fg_bright())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, drink) in app.inventory.iter().enumerate().skip(app.stock_scroll) {
        let style = if i == app.stock_scroll {
            Style::default().fg(app.theme.fg_bright())
        } else {
            Style::default().fg(app.theme.fg())
        };
        lines.extend(
            drink_rows(drink)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, style))),
        );
    }

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}
