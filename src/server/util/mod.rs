//! Utility functions shared across services.
//!
//! Password hashing, recipe image decoding and CSV reading/writing for the shopping list
//! report and reference data import.

pub mod csv;
pub mod image;
pub mod password;
