pub mod activity;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod nicknames;
pub mod scan;
pub mod storage;
pub mod store;
pub mod undo;

pub use activity::{ActivityEntry, ActivityLog, MessageLevel};
pub use config::AppConfig;
pub use controller::{InventoryController, Mode, ScanOutcome, QUANTITIES};
pub use error::{AbvError, Result};
pub use models::*;
pub use nicknames::NicknameMap;
pub use store::{InventoryStore, SharedStore};

pub use storage::database::{open_database, open_in_memory, ConnectionPool, Database};
pub use storage::queries::InventoryQuery;
pub use storage::repositories::{
    DrinkRepository, MovementRepository, Repository, SqliteDrinkRepository,
    SqliteMovementRepository,
};

pub use undo::{
    ActionHistory, Actor, CreateAndStockAction, CreateDrinkAction, DrinkAction, ReversibleAction,
    StockMovementAction,
};
