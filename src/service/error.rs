use crate::core::material_class::MaterialClass;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{field} must be a finite number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("class id {0} is not in the class table (0..=5)")]
    InvalidClass(i64),

    #[error("count for {0} cannot grow any further")]
    CountOverflow(MaterialClass),

    #[error(transparent)]
    StorageUnavailable(#[from] StorageError),
}

impl ServiceError {
    /// Input and class errors leave every piece of state untouched and can
    /// simply be re-entered.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ServiceError::StorageUnavailable(_))
    }
}
