//! Request body extraction with validation.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;
use tourbook_core::error::CoreError;
use tourbook_core::tour::{self, CreateTour, UpdateTour};

use crate::error::AppError;

/// A request body type that can be checked from raw JSON.
pub trait ValidateBody: Sized {
    fn from_json(body: &Value) -> Result<Self, CoreError>;
}

impl ValidateBody for CreateTour {
    fn from_json(body: &Value) -> Result<Self, CoreError> {
        tour::parse_create(body)
    }
}

impl ValidateBody for UpdateTour {
    fn from_json(body: &Value) -> Result<Self, CoreError> {
        tour::parse_update(body)
    }
}

/// JSON body that has passed validation.
///
/// Anything that is not a well-formed JSON document, including a missing
/// `Content-Type: application/json` header, is rejected as a validation
/// error on `body` so every malformed request gets the same 400 response.
///
/// ```ignore
/// async fn create(Validated(input): Validated<CreateTour>) -> AppResult<Json<Tour>> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidateBody + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::Core(CoreError::invalid_field(
                    tour::FIELD_BODY,
                    rejection.body_text(),
                ))
            })?;

        Ok(Validated(T::from_json(&body)?))
    }
}
