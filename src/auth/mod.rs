//! Password hashing for registration and login.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool instead
//! of stalling the async workers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Returned on login in place of a real session token.
///
/// No session is issued and nothing validates this value on later requests.
pub const PLACEHOLDER_TOKEN: &str = "dummy-token";

/// Hash a plaintext password with a freshly generated salt
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Check a plaintext password against a stored hash.
///
/// A hash bcrypt cannot parse counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> bool {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await;

    match outcome {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
        Err(join_err) => {
            tracing::error!("Password verification task failed: {}", join_err);
            false
        }
    }
}
