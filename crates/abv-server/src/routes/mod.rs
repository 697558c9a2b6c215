pub mod frontend;
pub mod health;
pub mod inventory;
