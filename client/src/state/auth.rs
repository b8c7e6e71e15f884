//! Auth-session state machine for the current visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and components need a synchronous, already-resolved view of "is
//! this visitor authenticated, and who are they" without each of them
//! re-implementing the asynchronous resolution step. One `AuthSession` is
//! provided via context at the application root; every descendant reads the
//! same instance.
//!
//! DESIGN
//! ======
//! Resolution is an explicit three-state machine. A cycle enters `Resolving`
//! when the identity fetch begins and `Resolved` when it completes; later
//! cycles re-enter `Resolving`, but `has_initialized` latches true after the
//! first completion and never resets. Consumers that must not flash the
//! anonymous experience gate on `has_initialized` rather than
//! `is_authenticated`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::Identity;

/// Resolution phase of the auth session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// No resolution cycle has started.
    #[default]
    Uninitialized,
    /// An identity fetch is in flight.
    Resolving,
    /// The last fetch completed.
    Resolved,
}

/// Read-only auth view shared by all user-aware components.
#[derive(Clone, Debug, Default)]
pub struct AuthSession {
    phase: AuthPhase,
    current_user: Option<Identity>,
    has_initialized: bool,
}

impl AuthSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current resolution phase.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// True iff a resolved identity exists and reports itself authenticated.
    /// An absent identity is a valid anonymous state, never an error.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user.as_ref().is_some_and(|user| user.authenticated)
    }

    /// The resolved principal, or `None` before the first cycle completes.
    #[must_use]
    pub fn current_user(&self) -> Option<&Identity> {
        self.current_user.as_ref()
    }

    /// False until the first resolution cycle completes; true for the rest
    /// of the session's lifetime.
    #[must_use]
    pub fn has_initialized(&self) -> bool {
        self.has_initialized
    }

    /// Enter `Resolving`. Called at the start of every resolution cycle;
    /// previously resolved state stays visible while the fetch runs.
    pub fn begin_resolve(&mut self) {
        self.phase = AuthPhase::Resolving;
    }

    /// Complete the current cycle with the fetched identity.
    /// `has_initialized` latches true and stays true on later cycles.
    pub fn complete(&mut self, identity: Option<Identity>) {
        self.current_user = identity;
        self.phase = AuthPhase::Resolved;
        self.has_initialized = true;
    }
}

/// Provide the shared auth session at the application root.
pub fn provide_auth_session() -> RwSignal<AuthSession> {
    let auth = RwSignal::new(AuthSession::new());
    provide_context(auth);
    auth
}

/// The ambient auth session.
///
/// # Panics
///
/// Panics if no ancestor provided the session. A missing provider is a
/// wiring defect, not a recoverable condition.
#[must_use]
pub fn use_auth_session() -> RwSignal<AuthSession> {
    expect_context::<RwSignal<AuthSession>>()
}
