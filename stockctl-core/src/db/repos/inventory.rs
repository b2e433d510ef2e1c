//! Inventory repository
//!
//! One statement per method:
//! - listings select every column, filtered on `active`
//! - low-stock deliberately skips the `active` filter
//! - archive/unarchive flip the soft-delete flag and report the row count

use chrono::NaiveDate;
use sqlx::PgConnection;

use crate::models::{InventoryItem, Location, LowStockRow, NewItem};

const ITEM_COLUMNS: &str = r#"id, item, quantity, category, location_type, aisle, "position",
    barcode, image_url, last_ordered, active"#;

/// Inventory repository bound to one open connection
pub struct InventoryRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> InventoryRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Active items ordered by name.
    pub async fn list_active(self) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM inventory WHERE active = TRUE ORDER BY item COLLATE \"C\" ASC"
        );
        sqlx::query_as(&sql).fetch_all(self.conn).await
    }

    /// Active items at one location, ordered by name.
    pub async fn list_at(self, location: Location) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM inventory \
             WHERE active = TRUE AND location_type = $1 ORDER BY item COLLATE \"C\" ASC"
        );
        sqlx::query_as(&sql)
            .bind(location.as_str())
            .fetch_all(self.conn)
            .await
    }

    /// Append an item. `active` comes from the column default.
    pub async fn insert(self, item: &NewItem, today: NaiveDate) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO inventory (item, quantity, category, aisle, "position",
                                   location_type, barcode, image_url, last_ordered)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.name())
        .bind(item.quantity)
        .bind(item.category.as_deref())
        .bind(item.aisle.as_deref())
        .bind(item.position.as_deref())
        .bind(item.location.as_str())
        .bind(item.barcode.as_deref())
        .bind(item.image_url.as_deref())
        .bind(today)
        .execute(self.conn)
        .await?;
        Ok(())
    }

    /// Overwrite the quantity (full replace, not a delta).
    pub async fn update_quantity(self, id: i64, quantity: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE inventory SET quantity = $1 WHERE id = $2")
            .bind(quantity)
            .bind(id)
            .execute(self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Items at or below the threshold, archived ones included.
    pub async fn low_stock(self, threshold: i32) -> Result<Vec<LowStockRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, item, quantity, category
            FROM inventory
            WHERE quantity <= $1
            ORDER BY quantity ASC, id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(self.conn)
        .await
    }

    /// Set the soft-delete flag.
    pub async fn set_active(self, id: i64, active: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE inventory SET active = $1 WHERE id = $2")
            .bind(active)
            .bind(id)
            .execute(self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}
