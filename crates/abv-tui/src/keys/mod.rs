mod popup_keys;
#[cfg(test)]
mod tests;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::App;
use abv_core::Mode;

/// Key bindings shown on the prompt line: `(key, label, quantity)`.
pub const HINTS: &[(&str, &str, Option<u32>)] = &[
    ("Ctrl-i", "stocking", None),
    ("Ctrl-o", "serving", None),
    ("Ctrl-z", "undo", None),
    ("Ctrl-r", "redo", None),
    ("Ctrl-c", "quit", None),
    ("F1", "single", Some(1)),
    ("F4", "four-pack", Some(4)),
    ("F6", "six-pack", Some(6)),
    ("F12", "twelve-pack", Some(12)),
];

pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Error dialog takes priority
    if app.error.is_some() {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            app.error = None;
        }
        return;
    }

    if app.popup.is_some() {
        popup_keys::handle_popup_key(app, code, modifiers);
        return;
    }

    match code {
        // Terminals deliver Ctrl-i as Tab.
        KeyCode::Tab => app.set_mode(Mode::Stocking),
        KeyCode::Char('i') if ctrl => app.set_mode(Mode::Stocking),
        KeyCode::Char('o') if ctrl => app.set_mode(Mode::Serving),
        KeyCode::Char('z') if ctrl => app.undo(),
        KeyCode::Char('r') if ctrl => app.redo(),
        KeyCode::F(n @ (1 | 4 | 6 | 12)) => app.set_quantity(u32::from(n)),
        KeyCode::Up => app.scroll_stock(-1),
        KeyCode::Down => app.scroll_stock(1),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Esc => app.input.clear(),
        KeyCode::Char(c) if !ctrl => app.input.push(c),
        _ => {}
    }
}
