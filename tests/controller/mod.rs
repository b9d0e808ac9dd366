//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors, the responses are checked for status
//! codes and, where it matters, their bodies.

mod auth;
mod ingredient;
mod recipe;
mod tag;
mod user;

use foodgram_test_utils::prelude::*;

use crate::util::{
    http::{body_bytes, body_json},
    session::{log_in, register_user},
};
