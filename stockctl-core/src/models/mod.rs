//! Domain models with validation at construction
//!
//! User input is validated when building [`NewItem`] or a duty task.
//! Invalid input returns ValidationError, not panic.

pub mod catalog;
pub mod duty;
pub mod item;
pub mod validation;

pub use catalog::{NameSuggestion, SUGGESTION_LIMIT};
pub use duty::Duty;
pub use item::{InventoryItem, Location, LowStockRow, NewItem, DEFAULT_LOW_STOCK_THRESHOLD};
pub use validation::{optional, required, storable, ValidationError};
