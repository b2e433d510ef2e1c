//! Duties - the `duties` table

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Operational duty as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Duty {
    pub id: i64,
    pub task: String,
    pub completed: bool,
    pub date: NaiveDate,
}
