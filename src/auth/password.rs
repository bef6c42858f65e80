//! Password and security-answer hashing via bcrypt (salted, adaptive cost).

use bcrypt::{hash, verify, BcryptError};

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}

/// Security answers are compared case-insensitively, so they are normalized
/// before hashing and before verification.
pub fn normalize_security_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
