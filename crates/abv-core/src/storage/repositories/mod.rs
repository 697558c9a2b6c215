mod drink_repository;
mod movement_repository;

pub use drink_repository::{DrinkRepository, SqliteDrinkRepository};
pub(crate) use drink_repository::DRINK_COLUMNS;
pub use movement_repository::{MovementRepository, SqliteMovementRepository};

use crate::error::Result;

pub trait Repository {
    type Entity;
    type Id: ?Sized;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>>;
    fn delete(&self, id: &Self::Id) -> Result<bool>;
}
