//! Admin password handling.
//!
//! Hashes are Argon2id PHC strings, so the salt and cost parameters travel
//! with the stored value. Hashing and verification are CPU-bound and run on
//! the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use validator::ValidationError;

use crate::error::{AppError, AppResult};

/// Minimum accepted password length for admin accounts, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// `validator` rule for password fields on register and profile update.
pub fn password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("password_too_short");
        err.message = Some(format!("must be at least {MIN_PASSWORD_LENGTH} characters long").into());
        return Err(err);
    }
    Ok(())
}

/// Hash `password` with a fresh random salt.
pub async fn hash_password(password: String) -> AppResult<String> {
    off_runtime(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
}

/// Check `password` against a stored hash. A mismatch is `Ok(false)`; an
/// unparsable stored hash is an internal error.
pub async fn verify_password(password: String, stored_hash: String) -> AppResult<bool> {
    off_runtime(move || {
        let parsed = PasswordHash::new(&stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    })
    .await
}

async fn off_runtime<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, password_hash::Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(format!("Password task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}
