//! Duty repository

use chrono::NaiveDate;
use sqlx::PgConnection;

use crate::models::Duty;

/// Duty repository bound to one open connection
pub struct DutyRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> DutyRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// All duties, newest first; same-day duties by descending id.
    pub async fn list(self) -> Result<Vec<Duty>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, task, completed, "date"
            FROM duties
            ORDER BY "date" DESC, id DESC
            "#,
        )
        .fetch_all(self.conn)
        .await
    }

    pub async fn insert(self, task: &str, today: NaiveDate) -> Result<(), sqlx::Error> {
        sqlx::query(r#"INSERT INTO duties (task, completed, "date") VALUES ($1, FALSE, $2)"#)
            .bind(task)
            .bind(today)
            .execute(self.conn)
            .await?;
        Ok(())
    }

    /// One-way transition; there is no reopen.
    pub async fn complete(self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE duties SET completed = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}
