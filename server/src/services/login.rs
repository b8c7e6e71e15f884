//! Email access-code login service.
//!
//! Creates and verifies short-lived six-character codes linked to an email.
//! Codes are stored hashed, consumed on first successful verification, and
//! retired after too many failures.

use rand::Rng;
use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::state::{AppState, LoginCode, UserRecord};

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: u32 = 5;

/// How long a code stays redeemable after issue.
pub const CODE_TTL: Duration = Duration::minutes(10);

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("expired or incorrect code")]
    VerificationFailed,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN
        || !normalized
            .chars()
            .all(|c| CODE_ALPHABET.contains(&(c as u8)))
    {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[must_use]
pub fn hash_access_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

fn name_from_email(email: &str) -> String {
    let local = email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user");
    local.to_owned()
}

/// Issue a fresh access code for the email, replacing any pending one.
/// The user record is created on first request.
pub async fn request_access_code(state: &AppState, email: &str) -> Result<String, LoginError> {
    let normalized = normalize_email(email).ok_or(LoginError::InvalidEmail)?;

    ensure_user(state, &normalized).await;

    let code = generate_access_code();
    let record = LoginCode {
        code_hash: hash_access_code(&code),
        expires_at: OffsetDateTime::now_utc() + CODE_TTL,
        attempts: 0,
    };
    state.login_codes.write().await.insert(normalized, record);
    Ok(code)
}

/// Verify an access code, consuming it on success or after too many
/// failures. Returns the user id on success.
pub async fn verify_access_code(state: &AppState, email: &str, code: &str) -> Result<Uuid, LoginError> {
    let normalized_email = normalize_email(email).ok_or(LoginError::InvalidEmail)?;
    let normalized_code = normalize_code(code).ok_or(LoginError::InvalidCode)?;
    let code_hash = hash_access_code(&normalized_code);

    let mut codes = state.login_codes.write().await;
    let Some(pending) = codes.get_mut(&normalized_email) else {
        return Err(LoginError::VerificationFailed);
    };
    if pending.expires_at <= OffsetDateTime::now_utc() {
        codes.remove(&normalized_email);
        return Err(LoginError::VerificationFailed);
    }
    if pending.code_hash != code_hash {
        pending.attempts += 1;
        if pending.attempts >= MAX_FAILED_ATTEMPTS {
            codes.remove(&normalized_email);
        }
        return Err(LoginError::VerificationFailed);
    }
    codes.remove(&normalized_email);
    drop(codes);

    let user_id = state.users_by_email.read().await.get(&normalized_email).copied();
    user_id.ok_or(LoginError::VerificationFailed)
}

/// Insert the user for this email if not present, returning the id.
/// The email index lock is held across the check so concurrent requests for
/// the same address resolve to one record.
async fn ensure_user(state: &AppState, email: &str) -> Uuid {
    let mut by_email = state.users_by_email.write().await;
    if let Some(id) = by_email.get(email) {
        return *id;
    }

    let user = UserRecord {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        name: name_from_email(email),
    };
    let id = user.id;
    state.users.write().await.insert(id, user);
    by_email.insert(email.to_owned(), id);
    id
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
