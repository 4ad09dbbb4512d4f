use thiserror::Error;

/// Errors raised by a `TableStore` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    /// Store answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Unexpected store response: {0}")]
    Decode(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl StoreError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        StoreError::Upstream { status, message: message.into() }
    }
}
