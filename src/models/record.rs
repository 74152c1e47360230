//! Persisted record type for the `test_data` table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of `test_data`.
///
/// `data` is nullable in the schema; the store adapters surface NULL as `""`.
/// `created_at` is defaulted by the database and only absent for rows that
/// were written with an explicit NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub data: String,
    pub created_at: Option<NaiveDateTime>,
}
