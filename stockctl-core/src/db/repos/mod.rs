//! Per-table repositories
//!
//! Each repository borrows one open connection and runs one statement per
//! method. Conflicts are handled in SQL, never by check-then-insert.

pub mod duties;
pub mod inventory;
pub mod names;

pub use duties::DutyRepo;
pub use inventory::InventoryRepo;
pub use names::NameCatalogRepo;
