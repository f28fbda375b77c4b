pub mod deal;
pub mod draft;
pub mod filter;
pub mod repository;

pub use deal::{Deal, ORIGIN_CODE, REQUIRED_FIELDS};
pub use draft::{DealEditor, DraftIntent};
pub use filter::DealFilter;
pub use repository::DealRepository;

#[derive(Debug, thiserror::Error)]
pub enum DealError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl DealError {
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing required field: {}", field))
    }

    pub fn not_found() -> Self {
        Self::NotFound("Deal not found".to_string())
    }
}

pub type DealResult<T> = Result<T, DealError>;
