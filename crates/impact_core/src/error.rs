use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Error taxonomy for the analysis and query engine.
///
/// Empty filtered result sets are *not* errors; `NotFound` is reserved for
/// lookups of a specifically-identified entity.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or out-of-range arguments (negative intensity, inverted
    /// filter bounds, zero page size). Never silently corrected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A specifically-identified entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The backing store failed. Propagated unmodified; retry policy
    /// belongs to the store-access layer, not this core.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
