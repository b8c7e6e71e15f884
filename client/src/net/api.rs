//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so identity
//! fetch failures degrade to the anonymous experience without crashing
//! hydration.

#![allow(clippy::unused_async)]

use super::types::Identity;

/// Fetch the resolved identity from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<Identity> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Identity>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Request an email access code via `POST /api/auth/login/request-code`.
/// Returns the echoed code when the server runs with code echo enabled.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn request_login_code(email: &str) -> Result<Option<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/login/request-code")
            .json(&serde_json::json!({ "email": email }))
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("code request failed: {}", resp.status()));
        }
        #[derive(serde::Deserialize)]
        struct CodeResponse {
            #[serde(default)]
            code: Option<String>,
        }
        let body: CodeResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.code)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Redeem an access code via `POST /api/auth/login/verify-code`,
/// establishing the session cookie.
///
/// # Errors
///
/// Returns an error string if verification fails.
pub async fn verify_login_code(email: &str, code: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/login/verify-code")
            .json(&serde_json::json!({ "email": email, "code": code }))
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("verification failed: {}", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, code);
        Err("not available on server".to_owned())
    }
}

/// Log out the current visitor by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await;
    }
}
