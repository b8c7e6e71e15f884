//! Wire-visible identity of the current visitor.
//!
//! DESIGN
//! ======
//! The identity is resolved server-side once per request and handed to the
//! UI as a read-only claims bag. The client mirrors these types in
//! `client::net::types` so serde round-trips stay lossless.

use serde::{Deserialize, Serialize};

use crate::state::UserRecord;

/// A single claim about the visitor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type (e.g. `"sub"`, `"name"`, `"email"`).
    pub kind: String,
    /// Claim value.
    pub value: String,
}

/// The resolved principal returned by `GET /api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Whether the visitor authenticated. Consumers must not assume that
    /// presence of an identity implies authentication.
    pub authenticated: bool,
    /// Claims about the visitor, in assembly order.
    pub claims: Vec<Claim>,
}

impl Identity {
    /// First value for the given claim kind.
    #[must_use]
    pub fn claim(&self, kind: &str) -> Option<&str> {
        self.claims.iter().find(|c| c.kind == kind).map(|c| c.value.as_str())
    }
}

/// Assemble the identity for an authenticated user.
#[must_use]
pub fn identity_for(user: &UserRecord) -> Identity {
    let claims = vec![
        Claim { kind: "sub".to_owned(), value: user.id.to_string() },
        Claim { kind: "name".to_owned(), value: user.name.clone() },
        Claim { kind: "email".to_owned(), value: user.email.clone() },
        Claim { kind: "auth_method".to_owned(), value: "email".to_owned() },
    ];
    Identity { authenticated: true, claims }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
