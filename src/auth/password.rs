use anyhow::Result;
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String> {
    let hashed = hash(password, DEFAULT_COST)?;
    Ok(hashed)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let valid = verify(password, password_hash)?;
    Ok(valid)
}
