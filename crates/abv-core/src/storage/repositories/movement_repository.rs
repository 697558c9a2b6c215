use std::sync::MutexGuard;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{DrinkEntry, MovementId, MovementKind};

use super::Repository;

pub trait MovementRepository: Repository<Entity = DrinkEntry, Id = MovementId> {
    fn insert(&self, entry: &DrinkEntry) -> Result<MovementId>;
    fn clear(&self) -> Result<usize>;
}

/// Repository over either the `input` or the `output` table; both share
/// one layout.
pub struct SqliteMovementRepository<'a> {
    conn: MutexGuard<'a, Connection>,
    kind: MovementKind,
}

impl<'a> SqliteMovementRepository<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>, kind: MovementKind) -> Self {
        Self { conn, kind }
    }
}

impl<'a> Repository for SqliteMovementRepository<'a> {
    type Entity = DrinkEntry;
    type Id = MovementId;

    fn find_by_id(&self, id: &MovementId) -> Result<Option<DrinkEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!(
                    "SELECT barcode, quantity, date FROM {} WHERE id = ?1",
                    self.kind.table()
                ),
                params![id.0],
                |row| {
                    Ok(DrinkEntry {
                        barcode: row.get(0)?,
                        quantity: row.get(1)?,
                        date: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn delete(&self, id: &MovementId) -> Result<bool> {
        let affected = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.kind.table()),
            params![id.0],
        )?;
        Ok(affected > 0)
    }
}

impl<'a> MovementRepository for SqliteMovementRepository<'a> {
    fn insert(&self, entry: &DrinkEntry) -> Result<MovementId> {
        let date = if entry.date == 0 { Utc::now().timestamp() } else { entry.date };
        self.conn.execute(
            &format!(
                "INSERT INTO {} (barcode, quantity, date) VALUES (?1, ?2, ?3)",
                self.kind.table()
            ),
            params![entry.barcode, entry.quantity, date],
        )?;
        Ok(MovementId(self.conn.last_insert_rowid()))
    }

    fn clear(&self) -> Result<usize> {
        let affected = self
            .conn
            .execute(&format!("DELETE FROM {}", self.kind.table()), [])?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Drink;
    use crate::storage::database::{run_migrations, ConnectionPool};
    use crate::storage::repositories::{DrinkRepository, SqliteDrinkRepository};

    use super::*;

    fn pool_with_drink() -> ConnectionPool {
        let pool = ConnectionPool::open_in_memory().unwrap();
        run_migrations(&pool.get_connection()).unwrap();
        SqliteDrinkRepository::new(pool.get_connection())
            .insert(&Drink::new("42", "Acme", "Lager"))
            .unwrap();
        pool
    }

    #[test]
    fn test_insert_returns_distinct_ids() {
        let pool = pool_with_drink();
        let repo = SqliteMovementRepository::new(pool.get_connection(), MovementKind::Input);
        let a = repo.insert(&DrinkEntry::new("42", 6)).unwrap();
        let b = repo.insert(&DrinkEntry::new("42", 4)).unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.find_by_id(&b).unwrap().unwrap().quantity, 4);
        assert_eq!(repo.find_by_id(&a).unwrap().unwrap().quantity, 6);
    }

    #[test]
    fn test_tables_are_independent() {
        let pool = pool_with_drink();
        let id = SqliteMovementRepository::new(pool.get_connection(), MovementKind::Input)
            .insert(&DrinkEntry::new("42", 2))
            .unwrap();

        let output = SqliteMovementRepository::new(pool.get_connection(), MovementKind::Output);
        assert!(output.find_by_id(&id).unwrap().is_none());
    }

    #[test]
    fn test_delete_and_clear() {
        let pool = pool_with_drink();
        let repo = SqliteMovementRepository::new(pool.get_connection(), MovementKind::Output);
        let id = repo.insert(&DrinkEntry::new("42", 1)).unwrap();
        repo.insert(&DrinkEntry::new("42", 1)).unwrap();

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
        assert_eq!(repo.clear().unwrap(), 1);
        assert_eq!(repo.clear().unwrap(), 0);
    }

    #[test]
    fn test_unknown_barcode_is_rejected() {
        let pool = pool_with_drink();
        let repo = SqliteMovementRepository::new(pool.get_connection(), MovementKind::Input);
        assert!(repo.insert(&DrinkEntry::new("nope", 1)).is_err());
    }
}
