use std::fmt;

use crate::error::{AbvError, Result};
use crate::models::{Drink, DrinkEntry, MovementId, MovementKind};
use crate::store::SharedStore;

/// A unit of work that can be applied to the store and later reversed.
///
/// `revert` may only follow a successful `apply`. A failing call leaves
/// the action in the state it had before the call.
pub trait ReversibleAction {
    fn apply(&mut self) -> Result<()>;
    fn revert(&mut self) -> Result<()>;
}

// ─── Create drink ──────────────────────────────────────────

pub struct CreateDrinkAction {
    store: SharedStore,
    drink: Drink,
    applied: bool,
}

impl CreateDrinkAction {
    pub fn new(store: SharedStore, drink: Drink) -> Self {
        Self {
            store,
            drink,
            applied: false,
        }
    }

    pub fn drink(&self) -> &Drink {
        &self.drink
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }
}

impl ReversibleAction for CreateDrinkAction {
    fn apply(&mut self) -> Result<()> {
        self.store.create_drink(&self.drink)?;
        self.applied = true;
        Ok(())
    }

    fn revert(&mut self) -> Result<()> {
        if !self.applied {
            return Err(AbvError::ActionNotApplied);
        }
        self.store.delete_drink(&self.drink.barcode)?;
        self.applied = false;
        Ok(())
    }
}

impl fmt::Debug for CreateDrinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateDrinkAction")
            .field("drink", &self.drink)
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

// ─── Stock movement ────────────────────────────────────────

/// Appends one row to the input or output ledger and remembers its id.
///
/// Built only through [`DrinkAction::stock_input`] and
/// [`DrinkAction::stock_output`], so the variant always matches `kind`.
pub struct StockMovementAction {
    store: SharedStore,
    kind: MovementKind,
    entry: DrinkEntry,
    id: Option<MovementId>,
}

impl StockMovementAction {
    fn new(store: SharedStore, kind: MovementKind, entry: DrinkEntry) -> Self {
        Self {
            store,
            kind,
            entry,
            id: None,
        }
    }

    fn input(store: SharedStore, entry: DrinkEntry) -> Self {
        Self::new(store, MovementKind::Input, entry)
    }

    fn output(store: SharedStore, entry: DrinkEntry) -> Self {
        Self::new(store, MovementKind::Output, entry)
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn entry(&self) -> &DrinkEntry {
        &self.entry
    }

    /// Row id of the movement while applied.
    pub fn movement_id(&self) -> Option<MovementId> {
        self.id
    }

    pub fn is_applied(&self) -> bool {
        self.id.is_some()
    }
}

impl ReversibleAction for StockMovementAction {
    fn apply(&mut self) -> Result<()> {
        let id = match self.kind {
            MovementKind::Input => self.store.record_input(&self.entry)?,
            MovementKind::Output => self.store.record_output(&self.entry)?,
        };
        self.id = Some(id);
        Ok(())
    }

    fn revert(&mut self) -> Result<()> {
        let id = self.id.ok_or(AbvError::ActionNotApplied)?;
        match self.kind {
            MovementKind::Input => self.store.delete_input(id)?,
            MovementKind::Output => self.store.delete_output(id)?,
        }
        self.id = None;
        Ok(())
    }
}

impl fmt::Debug for StockMovementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StockMovementAction")
            .field("kind", &self.kind)
            .field("entry", &self.entry)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// ─── Create and stock ──────────────────────────────────────

/// Creates a drink and stocks it, as one history entry.
///
/// Not atomic: when stocking fails after the drink was created, the
/// drink stays. A retried apply or revert skips the half that is already
/// in the wanted state.
#[derive(Debug)]
pub struct CreateAndStockAction {
    create: CreateDrinkAction,
    input: StockMovementAction,
}

impl CreateAndStockAction {
    pub fn new(store: SharedStore, drink: Drink, quantity: u32) -> Self {
        let entry = DrinkEntry::new(drink.barcode.clone(), quantity);
        Self {
            create: CreateDrinkAction::new(store.clone(), drink),
            input: StockMovementAction::input(store, entry),
        }
    }

    pub fn drink(&self) -> &Drink {
        self.create.drink()
    }

    pub fn quantity(&self) -> u32 {
        self.input.entry().quantity
    }

    pub fn movement_id(&self) -> Option<MovementId> {
        self.input.movement_id()
    }
}

impl ReversibleAction for CreateAndStockAction {
    fn apply(&mut self) -> Result<()> {
        if !self.create.is_applied() {
            self.create.apply()?;
        }
        self.input.apply()
    }

    /// A failed drink delete restores the input it just removed, so the
    /// store is left as it was before the call.
    fn revert(&mut self) -> Result<()> {
        let input_was_applied = self.input.is_applied();
        if input_was_applied {
            self.input.revert()?;
        }
        if let Err(err) = self.create.revert() {
            if input_was_applied {
                self.input.apply()?;
            }
            return Err(err);
        }
        Ok(())
    }
}

// ─── Closed set ────────────────────────────────────────────

/// Every mutation the inventory history records.
#[derive(Debug)]
pub enum DrinkAction {
    CreateDrink(CreateDrinkAction),
    StockInput(StockMovementAction),
    StockOutput(StockMovementAction),
    CreateAndStock(CreateAndStockAction),
}

impl DrinkAction {
    pub fn create_drink(store: SharedStore, drink: Drink) -> Self {
        Self::CreateDrink(CreateDrinkAction::new(store, drink))
    }

    pub fn stock_input(store: SharedStore, entry: DrinkEntry) -> Self {
        Self::StockInput(StockMovementAction::input(store, entry))
    }

    pub fn stock_output(store: SharedStore, entry: DrinkEntry) -> Self {
        Self::StockOutput(StockMovementAction::output(store, entry))
    }

    pub fn create_and_stock(store: SharedStore, drink: Drink, quantity: u32) -> Self {
        Self::CreateAndStock(CreateAndStockAction::new(store, drink, quantity))
    }

    pub fn barcode(&self) -> &str {
        match self {
            Self::CreateDrink(a) => &a.drink().barcode,
            Self::StockInput(a) | Self::StockOutput(a) => &a.entry().barcode,
            Self::CreateAndStock(a) => &a.drink().barcode,
        }
    }
}

impl ReversibleAction for DrinkAction {
    fn apply(&mut self) -> Result<()> {
        match self {
            Self::CreateDrink(a) => a.apply(),
            Self::StockInput(a) | Self::StockOutput(a) => a.apply(),
            Self::CreateAndStock(a) => a.apply(),
        }
    }

    fn revert(&mut self) -> Result<()> {
        match self {
            Self::CreateDrink(a) => a.revert(),
            Self::StockInput(a) | Self::StockOutput(a) => a.revert(),
            Self::CreateAndStock(a) => a.revert(),
        }
    }
}

impl fmt::Display for DrinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDrink(a) => write!(f, "create drink {}", a.drink().barcode),
            Self::StockInput(a) => {
                write!(f, "stock {} x{}", a.entry().barcode, a.entry().quantity)
            }
            Self::StockOutput(a) => {
                write!(f, "serve {} x{}", a.entry().barcode, a.entry().quantity)
            }
            Self::CreateAndStock(a) => {
                write!(f, "create and stock {} x{}", a.drink().barcode, a.quantity())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::database::Database;
    use crate::store::InventoryStore;

    fn store() -> (Arc<Database>, SharedStore) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let shared: SharedStore = db.clone();
        (db, shared)
    }

    #[test]
    fn test_create_drink_apply_and_revert() {
        let (db, shared) = store();
        let mut action = CreateDrinkAction::new(shared, Drink::new("1", "Acme", "Lager"));

        action.apply().unwrap();
        assert!(db.barcode_exists("1").unwrap());
        action.revert().unwrap();
        assert!(!db.barcode_exists("1").unwrap());
    }

    #[test]
    fn test_create_duplicate_is_apply_failure() {
        let (db, shared) = store();
        db.create_drink(&Drink::new("1", "Acme", "Lager")).unwrap();

        let mut action = CreateDrinkAction::new(shared, Drink::new("1", "Acme", "Lager"));
        assert!(matches!(action.apply(), Err(AbvError::DuplicateBarcode(_))));
        assert!(!action.is_applied());
        assert!(matches!(action.revert(), Err(AbvError::ActionNotApplied)));
        assert!(db.barcode_exists("1").unwrap());
    }

    #[test]
    fn test_movement_records_id_and_deletes_exactly_that_row() {
        let (db, shared) = store();
        db.create_drink(&Drink::new("1", "Acme", "Lager")).unwrap();
        db.record_input(&DrinkEntry::new("1", 12)).unwrap();

        let mut action = StockMovementAction::input(shared, DrinkEntry::new("1", 6));
        action.apply().unwrap();
        let id = action.movement_id().unwrap();
        assert_eq!(db.count_by_barcode("1").unwrap(), 18);

        action.revert().unwrap();
        assert!(action.movement_id().is_none());
        assert!(db.movement(MovementKind::Input, id).unwrap().is_none());
        assert_eq!(db.count_by_barcode("1").unwrap(), 12);
    }

    #[test]
    fn test_revert_before_apply_is_rejected() {
        let (_db, shared) = store();
        let mut action = StockMovementAction::output(shared, DrinkEntry::new("1", 1));
        assert!(matches!(action.revert(), Err(AbvError::ActionNotApplied)));
    }

    #[test]
    fn test_create_and_stock_orders_side_effects() {
        let (db, shared) = store();
        let mut action = CreateAndStockAction::new(shared, Drink::new("9", "Acme", "Stout"), 4);

        action.apply().unwrap();
        assert_eq!(db.count_by_barcode("9").unwrap(), 4);

        // Deleting the drink first would violate the input foreign key.
        action.revert().unwrap();
        assert!(!db.barcode_exists("9").unwrap());
        assert_eq!(db.count_by_barcode("9").unwrap(), 0);
    }

    #[test]
    fn test_stock_variants_carry_matching_kind() {
        let (_db, shared) = store();
        let input = DrinkAction::stock_input(shared.clone(), DrinkEntry::new("5", 6));
        let output = DrinkAction::stock_output(shared, DrinkEntry::new("5", 1));
        assert!(matches!(&input, DrinkAction::StockInput(a) if a.kind() == MovementKind::Input));
        assert!(matches!(&output, DrinkAction::StockOutput(a) if a.kind() == MovementKind::Output));
    }

    #[test]
    fn test_display() {
        let (_db, shared) = store();
        let action = DrinkAction::stock_output(shared, DrinkEntry::new("5", 1));
        assert_eq!(action.to_string(), "serve 5 x1");
        assert_eq!(action.barcode(), "5");
    }
}
