use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
