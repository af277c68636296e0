//! Tour entity model.

use serde::Serialize;
use sqlx::FromRow;
use tourbook_core::types::{Date, DbId, Timestamp};

/// A row from the `tours` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
