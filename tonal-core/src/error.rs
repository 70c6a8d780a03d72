use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid color {0:?}: expected 6 hex digits with an optional leading '#'")]
    InvalidColor(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Unknown scheme role: {0}")]
    UnknownRole(String),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
