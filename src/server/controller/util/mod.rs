//! Utility functions for controller request handling.
//!
//! Session user retrieval for protected endpoints, the JSON body extractor and paginated
//! response building.

pub mod extract;
pub mod get_user;
pub mod pagination;
