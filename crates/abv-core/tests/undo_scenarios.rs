use std::sync::Arc;

use abv_core::{
    AbvError, Actor, Database, Drink, DrinkAction, DrinkEntry, InventoryStore, MovementKind,
    SharedStore,
};
use tempfile::TempDir;

fn shared(db: &Arc<Database>) -> SharedStore {
    db.clone()
}

#[test]
fn create_stock_undo_twice_then_redo_step_by_step() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut actor = Actor::new();

    actor
        .add_action("", DrinkAction::create_drink(shared(&db), Drink::new("123", "Acme", "Lager")))
        .unwrap();
    actor
        .add_action("", DrinkAction::stock_input(shared(&db), DrinkEntry::new("123", 6)))
        .unwrap();
    assert_eq!(db.count_by_barcode("123").unwrap(), 6);

    assert!(actor.undo("").unwrap());
    assert!(actor.undo("").unwrap());
    assert!(!db.barcode_exists("123").unwrap());

    // The first redo re-applies the create only.
    assert!(actor.redo("").unwrap());
    assert!(db.barcode_exists("123").unwrap());
    assert_eq!(db.count_by_barcode("123").unwrap(), 0);

    assert!(actor.redo("").unwrap());
    let history = actor.history("").unwrap();
    let Some(DrinkAction::StockInput(input)) = history.current_action() else {
        panic!("current entry should be the stock input");
    };
    let id = input.movement_id().unwrap();
    let row = db.movement(MovementKind::Input, id).unwrap().unwrap();
    assert_eq!(row.barcode, "123");
    assert_eq!(row.quantity, 6);
    assert!(!actor.redo("").unwrap());
}

#[test]
fn create_and_stock_scenario_restores_movement_in_one_redo() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut actor = Actor::new();

    actor
        .add_action(
            "",
            DrinkAction::create_and_stock(shared(&db), Drink::new("123", "Acme", "Lager"), 6),
        )
        .unwrap();
    assert!(actor.undo("").unwrap());
    assert!(!actor.undo("").unwrap());
    assert!(actor.redo("").unwrap());

    assert!(db.barcode_exists("123").unwrap());
    assert_eq!(db.count_by_barcode("123").unwrap(), 6);
}

#[test]
fn duplicate_create_is_not_recorded() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut actor = Actor::new();
    actor
        .add_action("", DrinkAction::create_drink(shared(&db), Drink::new("1", "Acme", "Lager")))
        .unwrap();

    let err = actor
        .add_action("", DrinkAction::create_drink(shared(&db), Drink::new("1", "Acme", "Lager")))
        .unwrap_err();
    assert!(matches!(err, AbvError::DuplicateBarcode(_)));
    assert_eq!(actor.history("").unwrap().undo_depth(), 1);
}

#[test]
fn composite_keeps_created_drink_when_stocking_fails() {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(Database::open(&dir.path().join("abv.sqlite")).unwrap());
    let mut actor = Actor::new();

    {
        // Make the input insert fail after the drink insert succeeded.
        let conn = rusqlite::Connection::open(dir.path().join("abv.sqlite")).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_input BEFORE INSERT ON input
             BEGIN SELECT RAISE(ABORT, 'input rejected'); END;",
        )
        .unwrap();
    }

    let result = actor.add_action(
        "",
        DrinkAction::create_and_stock(shared(&db), Drink::new("5", "Acme", "Stout"), 4),
    );
    assert!(result.is_err());
    assert!(db.barcode_exists("5").unwrap());
    assert_eq!(db.count_by_barcode("5").unwrap(), 0);
    assert!(!actor.undo("").unwrap());
}

#[test]
fn failing_undo_keeps_cursor_and_returns_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("abv.sqlite");
    let db = Arc::new(Database::open(&path).unwrap());
    let mut actor = Actor::new();

    actor
        .add_action("", DrinkAction::create_drink(shared(&db), Drink::new("9", "Acme", "Lager")))
        .unwrap();
    actor
        .add_action("", DrinkAction::stock_input(shared(&db), DrinkEntry::new("9", 2)))
        .unwrap();

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER keep_input BEFORE DELETE ON input
             BEGIN SELECT RAISE(ABORT, 'input locked'); END;",
        )
        .unwrap();
    }

    let before = actor.history("").unwrap().current();
    assert!(actor.undo("").is_err());
    assert_eq!(actor.history("").unwrap().current(), before);
    assert_eq!(db.count_by_barcode("9").unwrap(), 2);

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("DROP TRIGGER keep_input;").unwrap();
    }
    assert!(actor.undo("").unwrap());
    assert_eq!(db.count_by_barcode("9").unwrap(), 0);
}

#[test]
fn scanners_have_separate_timelines() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    db.create_drink(&Drink::new("1", "Acme", "Lager")).unwrap();
    let mut actor = Actor::new();

    actor
        .add_action("a", DrinkAction::stock_input(shared(&db), DrinkEntry::new("1", 6)))
        .unwrap();
    actor
        .add_action("b", DrinkAction::stock_input(shared(&db), DrinkEntry::new("1", 4)))
        .unwrap();

    assert!(actor.undo("a").unwrap());
    assert_eq!(db.count_by_barcode("1").unwrap(), 4);
    assert!(!actor.undo("a").unwrap());
    assert!(!actor.undo("c").unwrap());
    assert!(actor.undo("b").unwrap());
    assert_eq!(db.count_by_barcode("1").unwrap(), 0);
}

#[test]
fn failed_create_and_stock_undo_keeps_its_stock() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let mut actor = Actor::new();

    actor
        .add_action(
            "",
            DrinkAction::create_and_stock(shared(&db), Drink::new("X", "Acme", "Lager"), 6),
        )
        .unwrap();
    actor
        .add_action("a", DrinkAction::stock_input(shared(&db), DrinkEntry::new("X", 4)))
        .unwrap();
    assert_eq!(db.count_by_barcode("X").unwrap(), 10);

    // Scanner "a" still holds a movement, so the drink cannot be deleted.
    let before = actor.history("").unwrap().current();
    assert!(matches!(actor.undo(""), Err(AbvError::Database(_))));
    assert_eq!(actor.history("").unwrap().current(), before);
    assert_eq!(db.count_by_barcode("X").unwrap(), 10);
    assert!(db.barcode_exists("X").unwrap());

    assert!(actor.undo("a").unwrap());
    assert!(actor.undo("").unwrap());
    assert!(!db.barcode_exists("X").unwrap());
    assert_eq!(db.count_by_barcode("X").unwrap(), 0);
}
