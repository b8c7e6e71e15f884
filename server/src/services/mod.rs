//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own identity and credential logic so route handlers can
//! stay focused on protocol translation and cookie plumbing.

pub mod login;
pub mod session;
