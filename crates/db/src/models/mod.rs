//! Database row structs.
//!
//! Input value objects (`CreateTour`, `UpdateTour`) live in `tourbook_core`
//! because they are produced by the validation layer.

pub mod tour;
