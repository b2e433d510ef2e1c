//! Inventory items - the `inventory` table
//!
//! `location_type` is stored as free text. Writes go through [`Location`],
//! so only `shelf` and `overstock` can be inserted; reads pass the stored
//! text through unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{optional, required, storable, ValidationError};

/// Threshold used by low-stock listings when the caller gives none
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 3;

/// Where a stock item lives in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// On the sales floor
    Shelf,
    /// In the back room
    #[default]
    Overstock,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Shelf, Location::Overstock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shelf => "shelf",
            Self::Overstock => "overstock",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shelf" => Ok(Self::Shelf),
            "overstock" => Ok(Self::Overstock),
            _ => Err(ValidationError::InvalidVariant {
                field: "location",
                value: s.to_owned(),
            }),
        }
    }
}

/// Inventory row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct InventoryItem {
    pub id: i64,
    pub item: String,
    pub quantity: i32,
    pub category: Option<String>,
    pub location_type: String,
    pub aisle: Option<String>,
    pub position: Option<String>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub last_ordered: NaiveDate,
    pub active: bool,
}

/// Projection returned by the low-stock listing: `id,item,quantity,category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct LowStockRow {
    pub id: i64,
    pub item: String,
    pub quantity: i32,
    pub category: Option<String>,
}

/// Fields for a new inventory row.
///
/// `last_ordered` and `active` are not part of the input: the store sets
/// them to today and true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    item: String,
    pub quantity: i32,
    pub category: Option<String>,
    pub aisle: Option<String>,
    pub position: Option<String>,
    pub location: Location,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
}

impl NewItem {
    /// Create a new item, trimming the display name.
    ///
    /// Quantity is passed through as given; negative values are allowed.
    ///
    /// # Example
    /// ```
    /// use stockctl_core::{Location, NewItem};
    ///
    /// let item = NewItem::new(" Tito's Vodka ", 2, Location::Shelf).unwrap();
    /// assert_eq!(item.name(), "Tito's Vodka");
    /// assert!(NewItem::new("  ", 2, Location::Shelf).is_err());
    /// ```
    pub fn new(item: &str, quantity: i32, location: Location) -> Result<Self, ValidationError> {
        Ok(Self {
            item: required("item", item)?,
            quantity,
            category: None,
            aisle: None,
            position: None,
            location,
            barcode: None,
            image_url: None,
        })
    }

    /// Display name, already trimmed and non-empty
    pub fn name(&self) -> &str {
        &self.item
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = optional(category);
        self
    }

    /// Aisle label plus position within the aisle
    pub fn with_placement(mut self, aisle: Option<String>, position: Option<String>) -> Self {
        self.aisle = optional(aisle);
        self.position = optional(position);
        self
    }

    pub fn with_barcode(mut self, barcode: Option<String>) -> Self {
        self.barcode = optional(barcode);
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = optional(image_url);
        self
    }

    /// Check the optional text fields for values the store cannot hold.
    ///
    /// The name was already checked by [`NewItem::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("category", &self.category),
            ("aisle", &self.aisle),
            ("position", &self.position),
            ("barcode", &self.barcode),
            ("image_url", &self.image_url),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                storable(field, value)?;
            }
        }
        Ok(())
    }

    /// Human summary for confirmations, e.g. `shelf A4 Top-Right`
    pub fn placement(&self) -> String {
        [
            Some(self.location.as_str()),
            self.aisle.as_deref(),
            self.position.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parses_known_values() {
        assert_eq!("shelf".parse::<Location>().unwrap(), Location::Shelf);
        assert_eq!(" Overstock ".parse::<Location>().unwrap(), Location::Overstock);
        assert_eq!(Location::default(), Location::Overstock);
    }

    #[test]
    fn location_rejects_unknown_values() {
        let err = "basement".parse::<Location>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "location", .. }));
    }

    #[test]
    fn location_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Location::Shelf).unwrap(), "\"shelf\"");
    }

    #[test]
    fn new_item_normalizes_optional_fields() {
        let item = NewItem::new("Bulleit Rye", 5, Location::Shelf)
            .unwrap()
            .with_category(Some("Whiskey".into()))
            .with_placement(Some("A4".into()), Some("".into()))
            .with_barcode(Some("  ".into()))
            .with_image_url(None);

        assert_eq!(item.category.as_deref(), Some("Whiskey"));
        assert_eq!(item.aisle.as_deref(), Some("A4"));
        assert_eq!(item.position, None);
        assert_eq!(item.barcode, None);
        assert_eq!(item.placement(), "shelf A4");
    }

    #[test]
    fn validate_rejects_nul_in_optional_fields() {
        let item = NewItem::new("Gin", 1, Location::Shelf)
            .unwrap()
            .with_barcode(Some("0801\0".into()));
        assert_eq!(
            item.validate().unwrap_err(),
            ValidationError::ContainsNul { field: "barcode" }
        );
        assert!(NewItem::new("Gin", 1, Location::Shelf).unwrap().validate().is_ok());
    }

    #[test]
    fn new_item_allows_negative_quantity() {
        let item = NewItem::new("Backordered", -4, Location::Overstock).unwrap();
        assert_eq!(item.quantity, -4);
    }

    #[test]
    fn inventory_item_serializes_date_as_iso() {
        let row = InventoryItem {
            id: 7,
            item: "Tito's Vodka".into(),
            quantity: 2,
            category: None,
            location_type: "shelf".into(),
            aisle: None,
            position: None,
            barcode: None,
            image_url: None,
            last_ordered: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            active: true,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["last_ordered"], "2026-10-14");
        assert_eq!(json["category"], serde_json::Value::Null);
    }
}
