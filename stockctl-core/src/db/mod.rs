//! Database layer - connection provider and repositories
//!
//! # Design Principles
//!
//! - Fresh connection per call, released on every path - no pool
//! - Autocommit, one statement per repository operation
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod connection;
pub mod repos;
pub mod store;

pub use connection::{ConnectionProvider, Session};
pub use store::{PgRepository, SCHEMA};
