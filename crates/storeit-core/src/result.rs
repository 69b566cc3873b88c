//! Convenience result type alias for StoreIt.

use crate::error::AppError;

/// A specialized `Result` type for StoreIt operations.
pub type AppResult<T> = Result<T, AppError>;
