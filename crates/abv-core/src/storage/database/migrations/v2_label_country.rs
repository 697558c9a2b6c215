use rusqlite::Connection;

use super::Migration;
use crate::error::Result;

pub struct V2LabelCountry;

const COLUMNS: [(&str, &str); 4] = [
    ("logo", "TEXT NOT NULL DEFAULT ''"),
    ("country", "TEXT NOT NULL DEFAULT ''"),
    ("shorttype", "TEXT NOT NULL DEFAULT ''"),
    ("shortbrand", "TEXT NOT NULL DEFAULT ''"),
];

impl Migration for V2LabelCountry {
    fn version(&self) -> u32 {
        2
    }

    fn description(&self) -> &'static str {
        "Add label, country and abbreviated style/brand columns to drinks"
    }

    fn up(&self, conn: &Connection) -> Result<()> {
        for (column, decl) in COLUMNS {
            let present: bool = conn
                .prepare("SELECT 1 FROM pragma_table_info('drinks') WHERE name = ?1")?
                .exists([column])?;

            if !present {
                conn.execute_batch(&format!("ALTER TABLE drinks ADD COLUMN {column} {decl};"))?;
            }
        }
        Ok(())
    }
}
