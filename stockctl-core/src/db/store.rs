//! PostgreSQL implementation of [`Repository`]
//!
//! Every call acquires its own session through [`ConnectionProvider::run`],
//! runs one statement, and releases the session before returning.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::debug;

use super::connection::ConnectionProvider;
use super::repos::{DutyRepo, InventoryRepo, NameCatalogRepo};
use crate::config::DbConfig;
use crate::error::Result;
use crate::models::{
    required, storable, Duty, InventoryItem, Location, LowStockRow, NameSuggestion, NewItem,
};
use crate::repository::Repository;

/// Bootstrap script for the three tables
pub const SCHEMA: &str = include_str!("schema.sql");

/// Repository backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgRepository {
    provider: ConnectionProvider,
}

impl PgRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(ConnectionProvider::new(config))
    }

    /// Create the tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        debug!("ensuring schema");
        self.provider
            .run(|conn| {
                Box::pin(async move {
                    sqlx::Executor::execute(conn, sqlx::raw_sql(SCHEMA))
                        .await
                        .map(|_| ())
                })
            })
            .await
    }
}

/// Local calendar date used for `last_ordered` and duty dates
fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> Result<()> {
        debug!("pinging store");
        self.provider
            .run(|conn| {
                Box::pin(async move {
                    sqlx::query_scalar::<_, i32>("SELECT 1")
                        .fetch_one(conn)
                        .await
                        .map(|_| ())
                })
            })
            .await
    }

    async fn list_active_items(&self) -> Result<Vec<InventoryItem>> {
        debug!("listing active items");
        self.provider
            .run(|conn| Box::pin(InventoryRepo::new(conn).list_active()))
            .await
    }

    async fn list_items_at(&self, location: Location) -> Result<Vec<InventoryItem>> {
        debug!(%location, "listing active items at location");
        self.provider
            .run(move |conn| Box::pin(InventoryRepo::new(conn).list_at(location)))
            .await
    }

    async fn insert_item(&self, item: &NewItem) -> Result<()> {
        item.validate()?;
        debug!(item = item.name(), location = %item.location, "inserting item");
        let item = item.clone();
        self.provider
            .run(move |conn| {
                Box::pin(async move { InventoryRepo::new(conn).insert(&item, today()).await })
            })
            .await
    }

    async fn remember_name(&self, name: &str) -> Result<()> {
        let name = required("name", name)?;
        debug!(%name, "remembering name");
        self.provider
            .run(move |conn| {
                Box::pin(async move { NameCatalogRepo::new(conn).remember(&name).await })
            })
            .await
    }

    async fn update_quantity(&self, id: i64, quantity: i32) -> Result<u64> {
        debug!(id, quantity, "updating quantity");
        self.provider
            .run(move |conn| Box::pin(InventoryRepo::new(conn).update_quantity(id, quantity)))
            .await
    }

    async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockRow>> {
        debug!(threshold, "listing low stock");
        self.provider
            .run(move |conn| Box::pin(InventoryRepo::new(conn).low_stock(threshold)))
            .await
    }

    async fn archive_item(&self, id: i64) -> Result<u64> {
        debug!(id, "archiving item");
        self.provider
            .run(move |conn| Box::pin(InventoryRepo::new(conn).set_active(id, false)))
            .await
    }

    async fn unarchive_item(&self, id: i64) -> Result<u64> {
        debug!(id, "unarchiving item");
        self.provider
            .run(move |conn| Box::pin(InventoryRepo::new(conn).set_active(id, true)))
            .await
    }

    async fn suggest_names(&self, query: &str) -> Result<Vec<NameSuggestion>> {
        storable("q", query)?;
        debug!(query, "suggesting names");
        let query = query.to_owned();
        self.provider
            .run(move |conn| {
                Box::pin(async move { NameCatalogRepo::new(conn).suggest(&query).await })
            })
            .await
    }

    async fn list_duties(&self) -> Result<Vec<Duty>> {
        debug!("listing duties");
        self.provider
            .run(|conn| Box::pin(DutyRepo::new(conn).list()))
            .await
    }

    async fn add_duty(&self, task: &str) -> Result<()> {
        let task = required("task", task)?;
        debug!(%task, "adding duty");
        self.provider
            .run(move |conn| {
                Box::pin(async move { DutyRepo::new(conn).insert(&task, today()).await })
            })
            .await
    }

    async fn complete_duty(&self, id: i64) -> Result<u64> {
        debug!(id, "completing duty");
        self.provider
            .run(move |conn| Box::pin(DutyRepo::new(conn).complete(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_all_tables() {
        for table in ["inventory", "duties", "name_catalog"] {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")),
                "missing {table}"
            );
        }
    }

    #[tokio::test]
    async fn blank_task_is_rejected_before_connecting() {
        // Port 1 would fail to connect; validation must fire first.
        let repo = PgRepository::from_config(&DbConfig {
            port: 1,
            ..DbConfig::default()
        });

        let err = repo.add_duty("   ").await.unwrap_err();
        assert!(matches!(err, crate::StoreError::Validation(_)));
    }

    #[test]
    fn schema_quiets_existing_relation_notices() {
        let first = SCHEMA
            .lines()
            .find(|line| !line.trim().is_empty() && !line.starts_with("--"));
        assert_eq!(first, Some("SET client_min_messages = warning;"));
    }

    #[tokio::test]
    async fn nul_query_is_rejected_before_connecting() {
        let repo = PgRepository::from_config(&DbConfig {
            port: 1,
            ..DbConfig::default()
        });

        let err = repo.suggest_names("Ti\0").await.unwrap_err();
        assert!(matches!(err, crate::StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn ping_reports_unreachable_store() {
        let repo = PgRepository::from_config(&DbConfig {
            port: 1,
            ..DbConfig::default()
        });

        assert!(repo.ping().await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn ensure_schema_reports_unreachable_store() {
        let repo = PgRepository::from_config(&DbConfig {
            port: 1,
            ..DbConfig::default()
        });

        let err = repo.ensure_schema().await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let repo = PgRepository::from_config(&DbConfig::from_env().expect("DB_* config"));

        repo.ensure_schema().await.expect("first bootstrap");
        repo.ensure_schema().await.expect("second bootstrap");
        repo.ping().await.expect("ping");
    }
}
