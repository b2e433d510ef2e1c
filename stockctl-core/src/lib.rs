//! stockctl-core: data-access contract for the stockroom tracker
//!
//! Provides the models, configuration, and the [`Repository`] trait shared by
//! the CLI and the web adapter:
//! - `inventory` items with soft delete (archive/unarchive)
//! - `duties` with one-way completion
//! - `name_catalog` for substring suggestions
//!
//! [`PgRepository`] talks to PostgreSQL with a fresh connection per call;
//! [`MemoryRepository`] keeps the same semantics in process for tests.

pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;

pub use config::DbConfig;
pub use db::{ConnectionProvider, PgRepository, Session};
pub use error::{Result, StoreError};
pub use memory::MemoryRepository;
pub use models::{
    Duty, InventoryItem, Location, LowStockRow, NameSuggestion, NewItem, ValidationError,
    DEFAULT_LOW_STOCK_THRESHOLD, SUGGESTION_LIMIT,
};
pub use repository::{add_item, AddItemOutcome, Repository};
