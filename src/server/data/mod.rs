//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries per table. They are generic over [`ConnectionTrait`] so the
//! same repository runs against the pooled connection or inside a transaction.
//!
//! [`ConnectionTrait`]: sea_orm::ConnectionTrait

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;
