use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not supplied by client")]
    MissingCredentials(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Untappd status code {0}: {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("image URL has no file name: {0}")]
    InvalidImageUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
