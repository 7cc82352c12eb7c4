//! Password hashing, delegated to bcrypt on the blocking thread pool.

use crate::ResultEngine;

pub(crate) async fn hash_password(plain: &str, cost: u32) -> ResultEngine<String> {
    let plain = plain.to_owned();
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost)).await??)
}

/// A digest that is not a valid bcrypt hash never verifies.
pub(crate) async fn verify_password(plain: &str, digest: &str) -> ResultEngine<bool> {
    let (plain, digest) = (plain.to_owned(), digest.to_owned());
    Ok(tokio::task::spawn_blocking(move || bcrypt::verify(plain, &digest).unwrap_or(false)).await?)
}
