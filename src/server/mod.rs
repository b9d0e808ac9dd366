//! Server application core modules.
//!
//! This module contains all server-side functionality for Foodgram: HTTP routing, session
//! based authentication, recipe composition, relation toggles (favorites, shopping cart,
//! subscriptions), shopping list aggregation and reference data import.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
