use larder_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("storage: {0}")]
    Storage(String),

    /// Malformed add-recipe submission.
    #[error("{0}")]
    Validation(String),

    #[error("no recipe loaded")]
    NoRecipe,

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
