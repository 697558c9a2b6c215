use crossterm::event::{KeyCode, KeyModifiers};

use abv_core::{Drink, InventoryStore, Mode};

use crate::app::tests::test_app;
use crate::keys::handle_key;
use crate::popup::Popup;

fn press(app: &mut crate::app::App, code: KeyCode) {
    handle_key(app, code, KeyModifiers::NONE);
}

fn ctrl(app: &mut crate::app::App, c: char) {
    handle_key(app, KeyCode::Char(c), KeyModifiers::CONTROL);
}

fn type_line(app: &mut crate::app::App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

#[test]
fn test_mode_keys() {
    let (_db, mut app) = test_app();
    ctrl(&mut app, 'i');
    assert_eq!(app.mode(), Mode::Stocking);
    ctrl(&mut app, 'o');
    assert_eq!(app.mode(), Mode::Serving);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.mode(), Mode::Stocking);
}

#[test]
fn test_quantity_keys_respect_mode() {
    let (_db, mut app) = test_app();
    press(&mut app, KeyCode::F(6));
    assert_eq!(app.controller.quantity(), 1);

    ctrl(&mut app, 'i');
    press(&mut app, KeyCode::F(12));
    assert_eq!(app.controller.quantity(), 12);
    press(&mut app, KeyCode::F(5));
    assert_eq!(app.controller.quantity(), 12);
}

#[test]
fn test_typed_scan_stocks_and_ctrl_z_undoes() {
    let (db, mut app) = test_app();
    db.create_drink(&Drink::new("55", "Acme", "Lager")).unwrap();

    ctrl(&mut app, 'i');
    press(&mut app, KeyCode::F(4));
    type_line(&mut app, "55");
    assert_eq!(db.count_by_barcode("55").unwrap(), 4);

    ctrl(&mut app, 'z');
    assert_eq!(db.count_by_barcode("55").unwrap(), 0);
    ctrl(&mut app, 'r');
    assert_eq!(db.count_by_barcode("55").unwrap(), 4);
}

#[test]
fn test_backspace_edits_prompt() {
    let (_db, mut app) = test_app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.input, "1");
}

#[test]
fn test_popup_keys() {
    let (_db, mut app) = test_app();
    app.popup = Some(Popup::Results {
        drinks: vec![Drink::new("", "A", "One"), Drink::new("", "B", "Two")],
        selected: 0,
    });

    press(&mut app, KeyCode::Down);
    ctrl(&mut app, 'k');
    ctrl(&mut app, 'j');
    assert_eq!(app.popup.as_ref().unwrap().selected_drink().unwrap().brand, "B");

    press(&mut app, KeyCode::Esc);
    assert!(app.popup.is_none());
    assert_eq!(
        app.controller.activity().last().unwrap().message,
        "Canceled selecting drink from list"
    );
}

#[test]
fn test_popup_typing_does_not_reach_prompt() {
    let (_db, mut app) = test_app();
    app.popup = Some(Popup::search());
    press(&mut app, KeyCode::Char('x'));
    assert!(app.input.is_empty());
    assert!(matches!(&app.popup, Some(Popup::Search { query }) if query == "x"));
}

#[test]
fn test_error_dialog_swallows_keys_until_esc() {
    let (_db, mut app) = test_app();
    app.error = Some("boom".to_string());
    press(&mut app, KeyCode::Char('1'));
    assert!(app.input.is_empty());
    press(&mut app, KeyCode::Esc);
    assert!(app.error.is_none());
}

#[test]
fn test_ctrl_c_quits_from_anywhere() {
    let (_db, mut app) = test_app();
    app.popup = Some(Popup::search());
    ctrl(&mut app, 'c');
    assert!(app.should_quit);
}
