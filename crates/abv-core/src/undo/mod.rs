//! Per-actor undo/redo log of reversible inventory mutations.

mod action;
mod actor;
mod history;

pub use action::{
    CreateAndStockAction, CreateDrinkAction, DrinkAction, ReversibleAction, StockMovementAction,
};
pub use actor::Actor;
pub use history::{ActionHistory, HistoryNode, HEAD};
