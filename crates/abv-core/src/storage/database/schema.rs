use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 2;

pub fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS drinks (
            barcode TEXT PRIMARY KEY,
            brand   TEXT NOT NULL DEFAULT '',
            name    TEXT NOT NULL DEFAULT '',
            abv     REAL NOT NULL DEFAULT 0,
            ibu     INTEGER NOT NULL DEFAULT 0,
            type    TEXT NOT NULL DEFAULT '',
            date    INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS input (
            id       INTEGER PRIMARY KEY,
            barcode  TEXT NOT NULL REFERENCES drinks(barcode),
            quantity INTEGER NOT NULL,
            date     INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS output (
            id       INTEGER PRIMARY KEY,
            barcode  TEXT NOT NULL REFERENCES drinks(barcode),
            quantity INTEGER NOT NULL,
            date     INTEGER NOT NULL
        );
        ",
    )?;
    Ok(())
}

pub fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_input_barcode  ON input(barcode);
        CREATE INDEX IF NOT EXISTS idx_input_date     ON input(date);
        CREATE INDEX IF NOT EXISTS idx_output_barcode ON output(barcode);
        CREATE INDEX IF NOT EXISTS idx_output_date    ON output(date);
        ",
    )?;
    Ok(())
}
