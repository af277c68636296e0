//! Tour service: CRUD operations plus the not-found policy.
//!
//! Every mutating operation looks the record up first, so an unknown id fails
//! with [`CoreError::NotFound`] before anything is written. Ids arrive as the
//! raw path segment; one that does not parse as a number is simply an id no
//! record can have, and also yields `NotFound`.

use std::sync::Arc;

use async_trait::async_trait;
use tourbook_core::error::CoreError;
use tourbook_core::tour::{self, CreateTour, UpdateTour};
use tourbook_core::types::DbId;
use tourbook_db::models::tour::Tour;
use tourbook_db::repositories::TourRepo;
use tourbook_db::DbPool;

use crate::error::{AppError, AppResult};

/// Persistence primitives the service needs. Errors are passed through to the
/// caller untouched.
#[async_trait]
pub trait TourStore: Send + Sync {
    async fn insert(&self, input: &CreateTour) -> Result<Tour, sqlx::Error>;

    /// All rows, latest `start_date` first.
    async fn find_all(&self) -> Result<Vec<Tour>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Tour>, sqlx::Error>;

    /// Apply a partial patch. `None` if the row does not exist.
    async fn update(&self, id: DbId, input: &UpdateTour) -> Result<Option<Tour>, sqlx::Error>;

    /// `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`TourStore`] backed by PostgreSQL through [`TourRepo`].
pub struct PgTourStore {
    pool: DbPool,
}

impl PgTourStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourStore for PgTourStore {
    async fn insert(&self, input: &CreateTour) -> Result<Tour, sqlx::Error> {
        TourRepo::create(&self.pool, input).await
    }

    async fn find_all(&self) -> Result<Vec<Tour>, sqlx::Error> {
        TourRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        TourRepo::find_by_id(&self.pool, id).await
    }

    async fn update(&self, id: DbId, input: &UpdateTour) -> Result<Option<Tour>, sqlx::Error> {
        TourRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        TourRepo::delete(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        tourbook_db::health_check(&self.pool).await
    }
}

/// Stateless between calls; cloning shares the same store handle.
#[derive(Clone)]
pub struct TourService {
    store: Arc<dyn TourStore>,
}

impl TourService {
    pub fn new(store: Arc<dyn TourStore>) -> Self {
        Self { store }
    }

    /// Persist a new tour. Duplicates are allowed.
    pub async fn create(&self, input: &CreateTour) -> AppResult<Tour> {
        let tour = self.store.insert(input).await?;
        tracing::info!(tour_id = tour.id, name = %tour.name, "Tour created");
        Ok(tour)
    }

    pub async fn list(&self) -> AppResult<Vec<Tour>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Tour> {
        let Ok(key) = id.parse::<DbId>() else {
            return Err(not_found(id));
        };
        self.store
            .find_by_id(key)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply `input` to an existing tour. An empty patch returns the current
    /// record without writing.
    pub async fn update(&self, id: &str, input: &UpdateTour) -> AppResult<Tour> {
        let existing = self.get(id).await?;
        if input.is_empty() {
            return Ok(existing);
        }

        // The row can vanish between the lookup and the write.
        let tour = self
            .store
            .update(existing.id, input)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(tour_id = tour.id, "Tour updated");
        Ok(tour)
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let existing = self.get(id).await?;
        if !self.store.delete(existing.id).await? {
            return Err(not_found(id));
        }
        tracing::info!(tour_id = existing.id, "Tour deleted");
        Ok(())
    }

    /// Whether the persistence collaborator is reachable.
    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Tour store health check failed");
                false
            }
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: tour::ENTITY,
        id: id.to_string(),
    })
}
