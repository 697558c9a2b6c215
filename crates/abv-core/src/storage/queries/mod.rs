mod inventory;

pub use inventory::InventoryQuery;
