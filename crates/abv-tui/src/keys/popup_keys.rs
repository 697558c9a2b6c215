use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::App;
use crate::popup::Popup;

pub(crate) fn handle_popup_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    if code == KeyCode::Esc {
        app.cancel_popup();
        return;
    }

    let Some(popup) = app.popup.as_mut() else {
        return;
    };

    match popup {
        Popup::Search { query } => match code {
            KeyCode::Enter => app.start_search(),
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(c) if !ctrl => query.push(c),
            _ => {}
        },
        Popup::Searching { .. } => {}
        Popup::Results { .. } => match code {
            KeyCode::Up => popup.move_selection(-1),
            KeyCode::Char('k') if ctrl => popup.move_selection(-1),
            KeyCode::Down => popup.move_selection(1),
            KeyCode::Char('j') if ctrl => popup.move_selection(1),
            KeyCode::Enter => app.select_drink(),
            _ => {}
        },
    }
}
