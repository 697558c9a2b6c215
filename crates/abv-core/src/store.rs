use std::sync::Arc;

use crate::error::Result;
use crate::models::{DateRange, Drink, DrinkEntry, MovementId, SortField, StockedDrink};

/// CRUD contract between the inventory logic and whatever persists it.
///
/// Every mutating call is its own unit of work; nothing here spans more
/// than one row.
pub trait InventoryStore: Send + Sync {
    // ─── Mutations ─────────────────────────────────────────

    /// Insert a new drink, returning its row id.
    fn create_drink(&self, drink: &Drink) -> Result<i64>;
    fn delete_drink(&self, barcode: &str) -> Result<()>;

    fn record_input(&self, entry: &DrinkEntry) -> Result<MovementId>;
    fn delete_input(&self, id: MovementId) -> Result<()>;

    fn record_output(&self, entry: &DrinkEntry) -> Result<MovementId>;
    fn delete_output(&self, id: MovementId) -> Result<()>;

    // ─── Queries ───────────────────────────────────────────

    fn barcode_exists(&self, barcode: &str) -> Result<bool>;
    fn drink_by_barcode(&self, barcode: &str) -> Result<Option<Drink>>;
    /// Units stocked minus units served.
    fn count_by_barcode(&self, barcode: &str) -> Result<i64>;
    /// Every drink with at least one unit in stock, ordered by brand.
    fn inventory(&self) -> Result<Vec<StockedDrink>>;
    fn inventory_sorted(&self, fields: &[SortField]) -> Result<Vec<StockedDrink>>;
    fn inventory_total_quantity(&self) -> Result<i64>;
    fn inventory_total_variety(&self) -> Result<i64>;
    fn input_within(&self, range: DateRange) -> Result<Vec<StockedDrink>>;
    fn output_within(&self, range: DateRange) -> Result<Vec<StockedDrink>>;
}

/// Store handle shared by actions, the controller and the HTTP services.
pub type SharedStore = Arc<dyn InventoryStore>;
