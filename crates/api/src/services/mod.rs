//! Business-logic services sitting between handlers and persistence.

pub mod tour;
