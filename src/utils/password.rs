use bcrypt::{hash, verify};

use crate::errors::AppError;

pub const BCRYPT_COST: u32 = 10;

/// Hashes on the blocking pool so the async workers stay free.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Dependency(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Dependency(format!("Failed to hash password: {}", e)))
}

/// Malformed stored hashes count as a mismatch.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::Dependency(format!("Password verification task failed: {}", e)))
}
