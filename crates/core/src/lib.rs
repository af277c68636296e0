//! Domain types and validation rules for the tour catalogue.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on top of it.

pub mod error;
pub mod tour;
pub mod types;
