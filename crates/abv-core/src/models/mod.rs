pub mod drink;
pub mod inventory;
pub mod movement;

pub use drink::*;
pub use inventory::*;
pub use movement::*;
