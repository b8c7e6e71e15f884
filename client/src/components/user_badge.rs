//! Identity chip for the signed-in visitor.

#[cfg(test)]
#[path = "user_badge_test.rs"]
mod user_badge_test;

use leptos::prelude::*;

use crate::state::auth::{AuthSession, use_auth_session};

/// Label shown in the badge: display name plus auth method.
pub(crate) fn badge_label(session: &AuthSession) -> String {
    match session.current_user() {
        Some(user) => {
            let name = user.display_name();
            match user.claim("auth_method") {
                Some(method) => format!("{name} ({method})"),
                None => name.to_owned(),
            }
        }
        None => "anonymous".to_owned(),
    }
}

/// Compact identity chip for toolbars. Renders nothing until the first
/// resolution cycle completes.
#[component]
pub fn UserBadge() -> impl IntoView {
    let auth = use_auth_session();

    view! {
        <Show when=move || auth.get().has_initialized()>
            <span class="user-badge">{move || badge_label(&auth.get())}</span>
        </Show>
    }
}
