use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to create {0}")]
    CreationFailed(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}
