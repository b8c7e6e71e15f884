//! Session-token management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses long-lived opaque session tokens stored server-side. The
//! token is the only thing the browser holds; everything else about the
//! visitor is resolved from it per request.

use std::fmt::Write;

use rand::Rng;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::state::{AppState, Session};

/// How long a session stays valid after creation.
pub const SESSION_TTL: Duration = Duration::days(30);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a session for the given user, returning the token.
pub async fn create_session(state: &AppState, user_id: Uuid) -> String {
    let token = generate_token();
    let session = Session {
        user_id,
        expires_at: OffsetDateTime::now_utc() + SESSION_TTL,
    };
    state.sessions.write().await.insert(token.clone(), session);
    token
}

/// Validate a session token and return the associated user id.
/// Expired sessions are removed on sight.
pub async fn validate_session(state: &AppState, token: &str) -> Option<Uuid> {
    let mut sessions = state.sessions.write().await;
    match sessions.get(token) {
        Some(session) if session.expires_at > OffsetDateTime::now_utc() => Some(session.user_id),
        Some(_) => {
            sessions.remove(token);
            None
        }
        None => None,
    }
}

/// Delete a session by token. Unknown tokens are a no-op.
pub async fn delete_session(state: &AppState, token: &str) {
    state.sessions.write().await.remove(token);
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
