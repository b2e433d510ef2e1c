//! Name catalog repository
//!
//! - remember: INSERT with ON CONFLICT DO NOTHING (idempotent)
//! - suggest: literal substring match, capped

use sqlx::PgConnection;

use crate::models::{NameSuggestion, SUGGESTION_LIMIT};

/// Name catalog repository bound to one open connection
pub struct NameCatalogRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> NameCatalogRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Insert a name; a name already in the catalog is left as is.
    pub async fn remember(self, name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO name_catalog (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(self.conn)
            .await?;
        Ok(())
    }

    /// Names containing `query`.
    ///
    /// `strpos` matches the query literally, so `%` and `_` in user input are
    /// not wildcards. Ordering is byte-wise.
    pub async fn suggest(self, query: &str) -> Result<Vec<NameSuggestion>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT name
            FROM name_catalog
            WHERE strpos(name, $1) > 0
            ORDER BY name COLLATE "C" ASC
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(SUGGESTION_LIMIT as i64)
        .fetch_all(self.conn)
        .await
    }
}
