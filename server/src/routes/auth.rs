//! Auth routes — email access-code login, session management, identity.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::identity::{self, Identity};
use crate::services::{login, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

/// Build the session cookie with the host's same-site policy applied.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(session::SESSION_TTL)
        .build()
}

fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn login_error_status(err: &login::LoginError) -> StatusCode {
    match err {
        login::LoginError::InvalidEmail | login::LoginError::InvalidCode => StatusCode::BAD_REQUEST,
        login::LoginError::VerificationFailed => StatusCode::UNAUTHORIZED,
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated visitor extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub identity: Identity,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user_id = session::validate_session(&app_state, token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let users = app_state.users.read().await;
        let user = users.get(&user_id).ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self {
            identity: identity::identity_for(user),
            token: token.to_owned(),
        })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me` — return the resolved identity for the current session.
pub async fn me(auth: AuthUser) -> Json<Identity> {
    Json(auth.identity)
}

#[derive(Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Serialize)]
pub struct RequestCodeResponse {
    /// Echoed access code, present only when `LOGIN_CODE_ECHO` is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `POST /api/auth/login/request-code` — issue a fresh access code.
pub async fn request_login_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<Json<RequestCodeResponse>, StatusCode> {
    let code = match login::request_access_code(&state, &body.email).await {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!(error = %e, "login code request rejected");
            return Err(login_error_status(&e));
        }
    };

    tracing::info!("login code issued");
    let echoed = state.config.login_code_echo.then_some(code);
    Ok(Json(RequestCodeResponse { code: echoed }))
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    pub code: String,
}

/// `POST /api/auth/login/verify-code` — redeem a code, set the session cookie.
pub async fn verify_login_code(State(state): State<AppState>, Json(body): Json<VerifyCodeBody>) -> Response {
    let user_id = match login::verify_access_code(&state, &body.email, &body.code).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "login code verification failed");
            return login_error_status(&e).into_response();
        }
    };

    let token = session::create_session(&state, user_id).await;
    tracing::info!(%user_id, "session created");

    let jar = CookieJar::new().add(session_cookie(token, state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT).into_response()
}

/// `POST /api/auth/logout` — delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    session::delete_session(&state, &auth.token).await;

    let jar = CookieJar::new().add(clear_session_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
