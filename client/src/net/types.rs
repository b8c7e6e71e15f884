//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types intentionally mirror the server's identity payloads so serde
//! round-trips stay lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A single claim about the visitor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type (e.g. `"sub"`, `"name"`, `"email"`).
    pub kind: String,
    /// Claim value.
    pub value: String,
}

/// The resolved principal as returned by `GET /api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Whether the visitor authenticated. Presence of an identity does not
    /// by itself imply authentication.
    pub authenticated: bool,
    /// Claims about the visitor, in server assembly order.
    pub claims: Vec<Claim>,
}

impl Identity {
    /// First value for the given claim kind.
    #[must_use]
    pub fn claim(&self, kind: &str) -> Option<&str> {
        self.claims.iter().find(|c| c.kind == kind).map(|c| c.value.as_str())
    }

    /// Display name, falling back to a generic label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.claim("name").unwrap_or("visitor")
    }
}
