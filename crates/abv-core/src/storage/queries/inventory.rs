use std::sync::MutexGuard;

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{DateRange, MovementKind, SortField, StockedDrink};
use crate::storage::repositories::DRINK_COLUMNS;
use crate::storage::repositories::SqliteDrinkRepository;

/// Per-drink stock (`sum(input) - sum(output)`), limited to drinks in stock.
const STOCK_SOURCE: &str = "
    FROM drinks d
    LEFT JOIN (SELECT barcode, SUM(quantity) AS qty FROM input GROUP BY barcode) i
           ON i.barcode = d.barcode
    LEFT JOIN (SELECT barcode, SUM(quantity) AS qty FROM output GROUP BY barcode) o
           ON o.barcode = d.barcode
    WHERE COALESCE(i.qty, 0) - COALESCE(o.qty, 0) > 0";

const STOCK_QUANTITY: &str = "COALESCE(i.qty, 0) - COALESCE(o.qty, 0)";

pub struct InventoryQuery<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> InventoryQuery<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>) -> Self {
        Self { conn }
    }

    fn row_to_stocked(row: &rusqlite::Row) -> rusqlite::Result<StockedDrink> {
        Ok(StockedDrink {
            drink: SqliteDrinkRepository::row_to_drink(row)?,
            quantity: row.get(11)?,
        })
    }

    /// Drinks in stock, ordered by the given fields (brand when empty).
    pub fn in_stock(&self, order: &[SortField]) -> Result<Vec<StockedDrink>> {
        let order_by = if order.is_empty() {
            SortField::Brand.column().to_string()
        } else {
            order
                .iter()
                .map(|f| f.column())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let sql = format!(
            "SELECT {DRINK_COLUMNS}, {STOCK_QUANTITY} AS quantity {STOCK_SOURCE} ORDER BY {order_by}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], Self::row_to_stocked)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn total_quantity(&self) -> Result<i64> {
        let total: i64 = self.conn.query_row(
            &format!("SELECT COALESCE(SUM({STOCK_QUANTITY}), 0) {STOCK_SOURCE}"),
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn total_variety(&self) -> Result<i64> {
        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) {STOCK_SOURCE}"),
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn count_for(&self, barcode: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT
                (SELECT COALESCE(SUM(quantity), 0) FROM input WHERE barcode = ?1)
              - (SELECT COALESCE(SUM(quantity), 0) FROM output WHERE barcode = ?1)",
            params![barcode],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Quantities moved per drink during `range`, ordered by brand.
    pub fn moved_within(&self, kind: MovementKind, range: DateRange) -> Result<Vec<StockedDrink>> {
        let sql = format!(
            "SELECT {DRINK_COLUMNS}, m.qty AS quantity
             FROM drinks d
             JOIN (SELECT barcode, SUM(quantity) AS qty FROM {table}
                   WHERE date >= ?1 AND date <= ?2 GROUP BY barcode) m
               ON m.barcode = d.barcode
             WHERE m.qty > 0
             ORDER BY d.brand",
            table = kind.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![range.start, range.end], Self::row_to_stocked)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
