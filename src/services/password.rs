use crate::errors::{AppError, AppResult};

/// Hashes on the blocking pool; bcrypt at production cost takes long enough
/// to stall an executor thread.
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::InternalError(format!("hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("verification task failed: {}", e)))?;

    // A stored value that is not a bcrypt hash can never match.
    Ok(verified.unwrap_or(false))
}
