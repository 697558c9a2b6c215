use thiserror::Error;

/// All errors that can occur in abv-core.
#[derive(Debug, Error)]
pub enum AbvError {
    #[error("Drink not found: {0}")]
    DrinkNotFound(String),

    #[error("No {0} movement with id {1}")]
    MovementNotFound(crate::models::MovementKind, crate::models::MovementId),

    #[error("A drink with barcode {0} already exists")]
    DuplicateBarcode(String),

    #[error("{operation} can only be called from {required} mode")]
    WrongMode {
        operation: &'static str,
        required: crate::controller::Mode,
    },

    #[error("Serving of multiple drinks at once is not supported")]
    MultiServeUnsupported,

    #[error("Unsupported quantity per scan: {0}")]
    InvalidQuantity(u32),

    #[error("Action cannot be undone before it has been applied")]
    ActionNotApplied,

    #[error("No barcode has been scanned yet")]
    NoPendingBarcode,

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AbvError>;
