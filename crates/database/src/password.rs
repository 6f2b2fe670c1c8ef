//! Credential hashing.

use crate::Result;

/// Default bcrypt cost for stored credentials.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a plaintext password with bcrypt at the given cost.
pub fn hash_password(plain: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(plain, hash)?)
}

/// A random password for accounts created implicitly (e.g. first WhatsApp
/// contact), which never log in with a password.
pub fn random_password() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
