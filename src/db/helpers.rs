//! Small helpers for turning query results into handler errors.
//!
//! ```ignore
//! let account = require_record(
//!     accounts::find_by_id(pool, account_id).await,
//!     "User not found",
//! )?;
//! ```

use crate::errors::AppError;

/// Unwraps an optional row, mapping `None` to a 404 with the given message.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> Result<T, AppError> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(AppError::NotFound(not_found_message.to_string())),
        Err(e) => Err(e.into()),
    }
}
