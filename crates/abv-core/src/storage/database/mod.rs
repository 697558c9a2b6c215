mod connection;
mod migrations;
mod schema;

pub use connection::ConnectionPool;
pub use migrations::{get_applied_versions, run_migrations, Migration};
pub use schema::SCHEMA_VERSION;

use std::path::Path;

use rusqlite::DatabaseName;

use crate::error::{AbvError, Result};
use crate::models::{
    DateRange, Drink, DrinkEntry, MovementId, MovementKind, SortField, StockedDrink,
};
use crate::store::InventoryStore;

use super::queries::InventoryQuery;
use super::repositories::{
    DrinkRepository, MovementRepository, Repository, SqliteDrinkRepository,
    SqliteMovementRepository,
};

pub fn open_database(path: &Path) -> Result<ConnectionPool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let pool = ConnectionPool::open(path)?;
    {
        let conn = pool.get_connection();
        migrations::run_migrations(&conn)?;
    }
    Ok(pool)
}

pub fn open_in_memory() -> Result<ConnectionPool> {
    let pool = ConnectionPool::open_in_memory()?;
    {
        let conn = pool.get_connection();
        migrations::run_migrations(&conn)?;
    }
    Ok(pool)
}

/// SQLite-backed inventory.
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let pool = open_database(path)?;
        tracing::debug!(path = %path.display(), "opened inventory database");
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> Result<Self> {
        let pool = open_in_memory()?;
        Ok(Self { pool })
    }

    pub fn path(&self) -> Option<&str> {
        self.pool.path()
    }

    fn drinks(&self) -> SqliteDrinkRepository<'_> {
        SqliteDrinkRepository::new(self.pool.get_connection())
    }

    fn movements(&self, kind: MovementKind) -> SqliteMovementRepository<'_> {
        SqliteMovementRepository::new(self.pool.get_connection(), kind)
    }

    fn query(&self) -> InventoryQuery<'_> {
        InventoryQuery::new(self.pool.get_connection())
    }

    fn record(&self, kind: MovementKind, entry: &DrinkEntry) -> Result<MovementId> {
        let id = self.movements(kind).insert(entry)?;
        tracing::debug!(%kind, %id, barcode = %entry.barcode, quantity = entry.quantity, "recorded movement");
        Ok(id)
    }

    fn remove(&self, kind: MovementKind, id: MovementId) -> Result<()> {
        if !self.movements(kind).delete(&id)? {
            return Err(AbvError::MovementNotFound(kind, id));
        }
        tracing::debug!(%kind, %id, "deleted movement");
        Ok(())
    }

    pub fn all_drinks(&self) -> Result<Vec<Drink>> {
        self.drinks().list_all()
    }

    pub fn movement(&self, kind: MovementKind, id: MovementId) -> Result<Option<DrinkEntry>> {
        self.movements(kind).find_by_id(&id)
    }

    /// Remove every stocking and serving record, keeping the drinks.
    pub fn clear_movements(&self) -> Result<usize> {
        let inputs = self.movements(MovementKind::Input).clear()?;
        let outputs = self.movements(MovementKind::Output).clear()?;
        tracing::info!(inputs, outputs, "cleared input and output records");
        Ok(inputs + outputs)
    }

    /// Write a consistent copy of the database to `dest`.
    pub fn backup_to(&self, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = self.pool.get_connection();
        conn.backup(DatabaseName::Main, dest, None)?;
        tracing::info!(dest = %dest.display(), "database backed up");
        Ok(())
    }

    pub fn schema_versions(&self) -> Result<Vec<u32>> {
        let conn = self.pool.get_connection();
        get_applied_versions(&conn)
    }
}

impl InventoryStore for Database {
    fn create_drink(&self, drink: &Drink) -> Result<i64> {
        let id = self.drinks().insert(drink)?;
        tracing::debug!(barcode = %drink.barcode, "created drink");
        Ok(id)
    }

    fn delete_drink(&self, barcode: &str) -> Result<()> {
        if !self.drinks().delete(barcode)? {
            return Err(AbvError::DrinkNotFound(barcode.to_string()));
        }
        tracing::debug!(barcode, "deleted drink");
        Ok(())
    }

    fn record_input(&self, entry: &DrinkEntry) -> Result<MovementId> {
        self.record(MovementKind::Input, entry)
    }

    fn delete_input(&self, id: MovementId) -> Result<()> {
        self.remove(MovementKind::Input, id)
    }

    fn record_output(&self, entry: &DrinkEntry) -> Result<MovementId> {
        self.record(MovementKind::Output, entry)
    }

    fn delete_output(&self, id: MovementId) -> Result<()> {
        self.remove(MovementKind::Output, id)
    }

    fn barcode_exists(&self, barcode: &str) -> Result<bool> {
        self.drinks().exists(barcode)
    }

    fn drink_by_barcode(&self, barcode: &str) -> Result<Option<Drink>> {
        self.drinks().find_by_id(barcode)
    }

    fn count_by_barcode(&self, barcode: &str) -> Result<i64> {
        self.query().count_for(barcode)
    }

    fn inventory(&self) -> Result<Vec<StockedDrink>> {
        self.query().in_stock(&[])
    }

    fn inventory_sorted(&self, fields: &[SortField]) -> Result<Vec<StockedDrink>> {
        self.query().in_stock(fields)
    }

    fn inventory_total_quantity(&self) -> Result<i64> {
        self.query().total_quantity()
    }

    fn inventory_total_variety(&self) -> Result<i64> {
        self.query().total_variety()
    }

    fn input_within(&self, range: DateRange) -> Result<Vec<StockedDrink>> {
        self.query().moved_within(MovementKind::Input, range)
    }

    fn output_within(&self, range: DateRange) -> Result<Vec<StockedDrink>> {
        self.query().moved_within(MovementKind::Output, range)
    }
}
