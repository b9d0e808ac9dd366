//! Foodgram recipe sharing backend.
//!
//! `model` holds the JSON representations exchanged over the API, `server` holds everything
//! that runs on the server: routing, controllers, services, repositories and configuration.

pub mod model;
pub mod server;
