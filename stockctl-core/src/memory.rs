//! In-memory [`Repository`] for tests and demos
//!
//! Mirrors the PostgreSQL semantics that callers can observe: byte-wise
//! (case-sensitive) name ordering, `active` filtering on listings but not on
//! low-stock, capped suggestions, matched-row counts, and newest-first
//! duties. It can also simulate an unreachable store.

use std::collections::BTreeSet;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::error::{Result, StoreError};
use crate::models::{
    required, storable, Duty, InventoryItem, Location, LowStockRow, NameSuggestion, NewItem,
    SUGGESTION_LIMIT,
};
use crate::repository::Repository;

#[derive(Default)]
struct Tables {
    inventory: Vec<InventoryItem>,
    duties: Vec<Duty>,
    name_catalog: BTreeSet<String>,
    next_item_id: i64,
    next_duty_id: i64,
    today: Option<NaiveDate>,
}

impl Tables {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Mock repository holding all three tables in process
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
    offline: bool,
    catalog_offline: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails with `StorageUnavailable`.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Only `remember_name` fails, as if the catalog statement lost the
    /// connection after the item insert went through.
    pub fn with_catalog_offline(mut self) -> Self {
        self.catalog_offline = true;
        self
    }

    /// Pin the date stamped on new items and duties.
    pub fn set_today(&self, date: NaiveDate) {
        self.lock().today = Some(date);
    }

    /// Run a closure against the tables, or fail like a refused connection.
    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T> {
        if self.offline {
            return Err(refused());
        }
        Ok(f(&mut self.lock()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A panic in another test thread must not poison every later call.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn refused() -> StoreError {
    StoreError::unavailable(sqlx::Error::Io(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "memory repository is offline",
    )))
}

fn active_sorted<'a>(items: impl Iterator<Item = &'a InventoryItem>) -> Vec<InventoryItem> {
    let mut rows: Vec<InventoryItem> = items.filter(|i| i.active).cloned().collect();
    rows.sort_by(|a, b| a.item.cmp(&b.item));
    rows
}

fn count_matching<T>(
    rows: &mut [T],
    matches: impl Fn(&T) -> bool,
    apply: impl Fn(&mut T),
) -> u64 {
    let mut affected = 0;
    for row in rows.iter_mut().filter(|r| matches(r)) {
        apply(row);
        affected += 1;
    }
    affected
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> Result<()> {
        self.with_tables(|_| ())
    }

    async fn list_active_items(&self) -> Result<Vec<InventoryItem>> {
        self.with_tables(|t| active_sorted(t.inventory.iter()))
    }

    async fn list_items_at(&self, location: Location) -> Result<Vec<InventoryItem>> {
        self.with_tables(|t| {
            active_sorted(
                t.inventory
                    .iter()
                    .filter(|i| i.location_type == location.as_str()),
            )
        })
    }

    async fn insert_item(&self, item: &NewItem) -> Result<()> {
        item.validate()?;
        self.with_tables(|t| {
            t.next_item_id += 1;
            let row = InventoryItem {
                id: t.next_item_id,
                item: item.name().to_owned(),
                quantity: item.quantity,
                category: item.category.clone(),
                location_type: item.location.as_str().to_owned(),
                aisle: item.aisle.clone(),
                position: item.position.clone(),
                barcode: item.barcode.clone(),
                image_url: item.image_url.clone(),
                last_ordered: t.today(),
                active: true,
            };
            t.inventory.push(row);
        })
    }

    async fn remember_name(&self, name: &str) -> Result<()> {
        let name = required("name", name)?;
        if self.catalog_offline {
            return Err(refused());
        }
        self.with_tables(|t| {
            t.name_catalog.insert(name);
        })
    }

    async fn update_quantity(&self, id: i64, quantity: i32) -> Result<u64> {
        self.with_tables(|t| {
            count_matching(&mut t.inventory, |i| i.id == id, |i| i.quantity = quantity)
        })
    }

    async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockRow>> {
        self.with_tables(|t| {
            let mut rows: Vec<LowStockRow> = t
                .inventory
                .iter()
                .filter(|i| i.quantity <= threshold)
                .map(|i| LowStockRow {
                    id: i.id,
                    item: i.item.clone(),
                    quantity: i.quantity,
                    category: i.category.clone(),
                })
                .collect();
            rows.sort_by_key(|r| (r.quantity, r.id));
            rows
        })
    }

    async fn archive_item(&self, id: i64) -> Result<u64> {
        self.with_tables(|t| {
            count_matching(&mut t.inventory, |i| i.id == id, |i| i.active = false)
        })
    }

    async fn unarchive_item(&self, id: i64) -> Result<u64> {
        self.with_tables(|t| {
            count_matching(&mut t.inventory, |i| i.id == id, |i| i.active = true)
        })
    }

    async fn suggest_names(&self, query: &str) -> Result<Vec<NameSuggestion>> {
        storable("q", query)?;
        // BTreeSet iterates in ascending byte order already.
        self.with_tables(|t| {
            t.name_catalog
                .iter()
                .filter(|name| name.contains(query))
                .take(SUGGESTION_LIMIT)
                .map(|name| NameSuggestion { name: name.clone() })
                .collect()
        })
    }

    async fn list_duties(&self) -> Result<Vec<Duty>> {
        self.with_tables(|t| {
            let mut rows = t.duties.clone();
            rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
            rows
        })
    }

    async fn add_duty(&self, task: &str) -> Result<()> {
        let task = required("task", task)?;
        self.with_tables(|t| {
            t.next_duty_id += 1;
            let duty = Duty {
                id: t.next_duty_id,
                task,
                completed: false,
                date: t.today(),
            };
            t.duties.push(duty);
        })
    }

    async fn complete_duty(&self, id: i64) -> Result<u64> {
        self.with_tables(|t| {
            count_matching(&mut t.duties, |d| d.id == id, |d| d.completed = true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, qty: i32) -> NewItem {
        NewItem::new(name, qty, Location::Shelf).unwrap()
    }

    #[tokio::test]
    async fn listing_orders_case_sensitively() {
        let repo = MemoryRepository::new();
        for name in ["vodka", "Whiskey", "Amaro"] {
            repo.insert_item(&item(name, 5)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_active_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.item)
            .collect();

        // Uppercase sorts before lowercase in byte order.
        assert_eq!(names, ["Amaro", "Whiskey", "vodka"]);
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let repo = MemoryRepository::new();
        repo.insert_item(&item("A", 1)).await.unwrap();
        repo.insert_item(&item("B", 1)).await.unwrap();

        let ids: Vec<i64> = repo
            .list_active_items()
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, [1, 2]);
    }

    #[tokio::test]
    async fn new_items_are_stamped_today() {
        let repo = MemoryRepository::new();
        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        repo.set_today(date);

        repo.insert_item(&item("Campari", 4)).await.unwrap();

        let rows = repo.list_active_items().await.unwrap();
        assert_eq!(rows[0].last_ordered, date);
        assert!(rows[0].active);
    }

    #[tokio::test]
    async fn offline_repository_reports_unavailable() {
        let repo = MemoryRepository::offline();
        assert!(repo.list_duties().await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn blank_task_is_rejected() {
        let repo = MemoryRepository::new();
        let err = repo.add_duty("").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
