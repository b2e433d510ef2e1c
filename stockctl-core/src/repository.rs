//! Repository trait - the data-access contract
//!
//! Every operation is one statement against the store. "No rows matched" is
//! never an error: updates return an affected-row count and listings return
//! an empty vector, and the adapters render those as "not found".

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Duty, InventoryItem, Location, LowStockRow, NameSuggestion, NewItem};

/// Typed operations over `inventory`, `duties` and `name_catalog` (testable)
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Active items ordered by name.
    async fn list_active_items(&self) -> Result<Vec<InventoryItem>>;

    /// Active items stored at one location, ordered by name.
    async fn list_items_at(&self, location: Location) -> Result<Vec<InventoryItem>>;

    /// Append one item with `last_ordered = today` and `active = true`.
    ///
    /// Does not touch the name catalog; see [`add_item`].
    async fn insert_item(&self, item: &NewItem) -> Result<()>;

    /// Add a name to the catalog; an existing name is left alone.
    async fn remember_name(&self, name: &str) -> Result<()>;

    /// Replace the quantity of one item. Returns the affected-row count.
    async fn update_quantity(&self, id: i64, quantity: i32) -> Result<u64>;

    /// Items with `quantity <= threshold`, lowest first.
    ///
    /// Archived items are included.
    async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockRow>>;

    /// Soft delete. Returns the affected-row count.
    async fn archive_item(&self, id: i64) -> Result<u64>;

    /// Undo a soft delete. Returns the affected-row count.
    async fn unarchive_item(&self, id: i64) -> Result<u64>;

    /// Catalog names containing `query`, ascending, at most
    /// [`SUGGESTION_LIMIT`](crate::SUGGESTION_LIMIT) rows.
    async fn suggest_names(&self, query: &str) -> Result<Vec<NameSuggestion>>;

    /// Duties, newest date first, ties broken by highest id.
    async fn list_duties(&self) -> Result<Vec<Duty>>;

    /// Append a not-completed duty dated today.
    async fn add_duty(&self, task: &str) -> Result<()>;

    /// Mark a duty completed. Returns the affected-row count.
    async fn complete_duty(&self, id: i64) -> Result<u64>;
}

/// Result of [`add_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddItemOutcome {
    /// Whether the name made it into the suggestion catalog
    pub name_remembered: bool,
}

/// Insert an item, then remember its name for suggestions.
///
/// The two statements are independent. If the insert fails nothing else runs
/// and the error is returned. If only the catalog step fails the item stays
/// persisted, the failure is logged, and the outcome reports
/// `name_remembered: false`.
pub async fn add_item(repo: &dyn Repository, item: &NewItem) -> Result<AddItemOutcome> {
    repo.insert_item(item).await?;
    debug!(item = item.name(), "inserted inventory item");

    let name_remembered = match repo.remember_name(item.name()).await {
        Ok(()) => true,
        Err(e) => {
            warn!(item = item.name(), error = %e, "item saved but name not added to catalog");
            false
        }
    };

    Ok(AddItemOutcome { name_remembered })
}
