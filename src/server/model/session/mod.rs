//! Session data models.
//!
//! Type-safe wrappers for values stored in the tower-sessions store (Valkey/Redis backed in
//! production, in memory during tests).

pub mod user;
