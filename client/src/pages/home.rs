//! Home page — the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gates on `has_initialized` so visitors never see the anonymous
//! experience flash while the first resolution cycle is in flight, then
//! redirects to `/login` when resolution yields no authenticated identity.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::user_badge::UserBadge;
use crate::state::auth::{AuthSession, use_auth_session};
use crate::util::auth::install_unauth_redirect;

/// Greeting shown once an authenticated identity is resolved.
pub(crate) fn greeting(session: &AuthSession) -> String {
    match session.current_user() {
        Some(user) if session.is_authenticated() => {
            format!("Welcome back, {}.", user.display_name())
        }
        _ => "Welcome.".to_owned(),
    }
}

/// Home page — shows the signed-in visitor and a logout action.
/// Redirects to `/login` if the visitor is not authenticated.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_session();
    let navigate = use_navigate();

    install_unauth_redirect(auth, navigate);

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                crate::net::api::logout().await;
                auth.update(|session| session.complete(None));
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            });
        }
    };

    view! {
        <Show
            when=move || auth.get().has_initialized() && auth.get().is_authenticated()
            fallback=move || {
                view! {
                    <div class="home-page">
                        <p>
                            {move || {
                                if auth.get().has_initialized() {
                                    "Redirecting to login..."
                                } else {
                                    "Loading..."
                                }
                            }}
                        </p>
                    </div>
                }
            }
        >
            <div class="home-page">
                <header class="home-page__header toolbar">
                    <span class="toolbar__title">"Waypost"</span>
                    <span class="toolbar__spacer"></span>
                    <UserBadge/>
                    <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                        "Logout"
                    </button>
                </header>
                <main class="home-page__body">
                    <p>{move || greeting(&auth.get())}</p>
                </main>
            </div>
        </Show>
    }
}
