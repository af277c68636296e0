use crate::services::tour::TourService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the service holds its store behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Tour business logic, wired to its persistence collaborator in `main`.
    pub tours: TourService,
}
