//! stockctl-server: web adapter over the stockctl repository
//!
//! Serves the quick-add form, JSON listings and name suggestions. Handlers
//! call exactly one repository operation each (the add form calls the
//! two-step item protocol) and keep no state besides the repository handle.

pub mod http;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
