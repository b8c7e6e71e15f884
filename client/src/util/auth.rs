//! Shared auth lifecycle helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The resolver drives the auth-session state machine from the browser, and
//! route components apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthSession;

/// Start a resolution cycle: enter `Resolving`, fetch the identity, and
/// complete the session with the result.
///
/// The fetch suspends only its own task. If the owning component is torn
/// down while the fetch is in flight, the cycle is abandoned and session
/// state is left untouched.
pub fn resolve_now(auth: RwSignal<AuthSession>) {
    auth.update(AuthSession::begin_resolve);

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            let identity = crate::net::api::fetch_current_user().await;
            if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                return;
            }
            auth.update(|session| session.complete(identity));
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }
}

/// True when resolution has completed and no authenticated identity is
/// present. Gating on `has_initialized` avoids redirecting while the first
/// cycle is still in flight.
pub(crate) fn should_redirect(session: &AuthSession) -> bool {
    session.has_initialized() && !session.is_authenticated()
}

/// Redirect to `/login` whenever resolution settles on an unauthenticated
/// visitor.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthSession>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if should_redirect(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
