use std::sync::MutexGuard;

use chrono::Utc;
use rusqlite::{ffi, params, Connection, OptionalExtension};

use crate::error::{AbvError, Result};
use crate::models::Drink;

use super::Repository;

pub(crate) const DRINK_COLUMNS: &str =
    "d.barcode, d.brand, d.name, d.abv, d.ibu, d.type, d.logo, d.country, d.shorttype, d.shortbrand, d.date";

pub trait DrinkRepository: Repository<Entity = Drink, Id = str> {
    /// Insert a drink that must not exist yet, returning its row id.
    fn insert(&self, drink: &Drink) -> Result<i64>;
    fn exists(&self, barcode: &str) -> Result<bool>;
    fn list_all(&self) -> Result<Vec<Drink>>;
}

pub struct SqliteDrinkRepository<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> SqliteDrinkRepository<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>) -> Self {
        Self { conn }
    }

    /// Map a row selected with [`DRINK_COLUMNS`] starting at column 0.
    pub(crate) fn row_to_drink(row: &rusqlite::Row) -> rusqlite::Result<Drink> {
        Ok(Drink {
            barcode: row.get(0)?,
            brand: row.get(1)?,
            name: row.get(2)?,
            abv: row.get(3)?,
            ibu: row.get(4)?,
            style: row.get(5)?,
            logo: row.get(6)?,
            country: row.get(7)?,
            short_style: row.get(8)?,
            short_brand: row.get(9)?,
            date: row.get(10)?,
        })
    }
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

impl<'a> Repository for SqliteDrinkRepository<'a> {
    type Entity = Drink;
    type Id = str;

    fn find_by_id(&self, barcode: &str) -> Result<Option<Drink>> {
        let drink = self
            .conn
            .query_row(
                &format!("SELECT {DRINK_COLUMNS} FROM drinks d WHERE d.barcode = ?1"),
                params![barcode],
                Self::row_to_drink,
            )
            .optional()?;
        Ok(drink)
    }

    fn delete(&self, barcode: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM drinks WHERE barcode = ?1", params![barcode])?;
        Ok(affected > 0)
    }
}

impl<'a> DrinkRepository for SqliteDrinkRepository<'a> {
    fn insert(&self, drink: &Drink) -> Result<i64> {
        let date = if drink.date == 0 { Utc::now().timestamp() } else { drink.date };
        let res = self.conn.execute(
            "INSERT INTO drinks
                (barcode, brand, name, abv, ibu, type, logo, country, shorttype, shortbrand, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                drink.barcode,
                drink.brand,
                drink.name,
                drink.abv,
                drink.ibu,
                drink.style,
                drink.logo,
                drink.country,
                drink.short_style,
                drink.short_brand,
                date,
            ],
        );

        match res {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_primary_key_violation(&e) => {
                Err(AbvError::DuplicateBarcode(drink.barcode.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, barcode: &str) -> Result<bool> {
        let exists = self
            .conn
            .prepare("SELECT 1 FROM drinks WHERE barcode = ?1")?
            .exists(params![barcode])?;
        Ok(exists)
    }

    fn list_all(&self) -> Result<Vec<Drink>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {DRINK_COLUMNS} FROM drinks d ORDER BY d.brand, d.name"))?;
        let drinks = stmt
            .query_map([], Self::row_to_drink)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(drinks)
    }
}
