//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the immutable host config plus in-memory stores for users,
//! sessions, and pending login codes. Identity state is process-local and
//! never outlives the process.

use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;

/// A registered user. Source of the claims assembled into an `Identity`.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// A live session-token record.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub expires_at: OffsetDateTime,
}

/// A pending email login code. Only the newest code per email is kept.
#[derive(Debug, Clone)]
pub struct LoginCode {
    pub code_hash: String,
    pub expires_at: OffsetDateTime,
    pub attempts: u32,
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all mutable fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Immutable host configuration, read once at startup.
    pub config: AppConfig,
    /// Users keyed by id.
    pub users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
    /// Email -> user id index for login.
    pub users_by_email: Arc<RwLock<HashMap<String, Uuid>>>,
    /// Sessions keyed by token.
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    /// Pending login codes keyed by normalized email.
    pub login_codes: Arc<RwLock<HashMap<String, LoginCode>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            users: Arc::new(RwLock::new(HashMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            login_codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::config::DEFAULT_PORT;

    /// Create a test `AppState` with empty stores and code echo enabled.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(AppConfig {
            port: DEFAULT_PORT,
            deploy_cdn: String::new(),
            cookie_secure: false,
            login_code_echo: true,
        })
    }

    /// Seed a user and return the id.
    pub async fn seed_user(state: &AppState, email: &str, name: &str) -> Uuid {
        let user = UserRecord {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            name: name.to_owned(),
        };
        let id = user.id;
        state.users.write().await.insert(id, user);
        state.users_by_email.write().await.insert(email.to_owned(), id);
        id
    }
}
