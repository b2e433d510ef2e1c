//! Command implementations for the stockctl CLI

pub mod db;
pub mod duties;
pub mod items;
#[cfg(feature = "server")]
pub mod serve;

pub use db::run_init_db;
pub use duties::{run_add_duty, run_complete_duty, run_list_duties};
pub use items::{
    run_add_item, run_archive_item, run_export_low_stock, run_list_items, run_low_stock,
    run_suggest_names, run_unarchive_item, run_update_qty,
};
#[cfg(feature = "server")]
pub use serve::run_serve;
