#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tourbook_api::config::ServerConfig;
use tourbook_api::router::build_app_router;
use tourbook_api::services::tour::{TourService, TourStore};
use tourbook_api::state::AppState;
use tourbook_core::tour::{CreateTour, UpdateTour};
use tourbook_core::types::DbId;
use tourbook_db::models::tour::Tour;

// ---------------------------------------------------------------------------
// In-memory persistence collaborator
// ---------------------------------------------------------------------------

/// [`TourStore`] kept in a `Vec`, so tests run without PostgreSQL.
///
/// An `offline` store fails every call the way a dropped database would.
#[derive(Default)]
pub struct MemoryTourStore {
    rows: Mutex<Vec<Tour>>,
    next_id: AtomicI64,
    offline: bool,
}

impl MemoryTourStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_online(&self) -> Result<(), sqlx::Error> {
        if self.offline {
            Err(sqlx::Error::PoolClosed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TourStore for MemoryTourStore {
    async fn insert(&self, input: &CreateTour) -> Result<Tour, sqlx::Error> {
        self.check_online()?;
        let now = chrono::Utc::now();
        let tour = Tour {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: input.name.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(tour.clone());
        Ok(tour)
    }

    async fn find_all(&self) -> Result<Vec<Tour>, sqlx::Error> {
        self.check_online()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        self.check_online()?;
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: DbId, input: &UpdateTour) -> Result<Option<Tour>, sqlx::Error> {
        self.check_online()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(tour) = rows.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            tour.name = name.clone();
        }
        if let Some(description) = &input.description {
            tour.description = Some(description.clone());
        }
        if let Some(location) = &input.location {
            tour.location = location.clone();
        }
        if let Some(start_date) = input.start_date {
            tour.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            tour.end_date = end_date;
        }
        tour.updated_at = chrono::Utc::now();
        Ok(Some(tour.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.check_online()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check_online()
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub fn test_service(store: Arc<MemoryTourStore>) -> TourService {
    TourService::new(store)
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<MemoryTourStore>) -> Router {
    let state = AppState {
        tours: test_service(store),
    };
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

/// Send a raw body with an explicit content type.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The canonical example tour body.
pub fn alps_trek() -> serde_json::Value {
    serde_json::json!({
        "name": "Alps Trek",
        "location": "Switzerland",
        "startDate": "2024-06-01",
        "endDate": "2024-06-10"
    })
}
