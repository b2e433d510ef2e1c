//! Database bootstrap command

use std::io::Write;

use anyhow::{Context, Result};
use stockctl_core::PgRepository;

use crate::render::Output;

/// Create the inventory, duties and name_catalog tables if missing.
pub async fn run_init_db<W: Write>(repo: &PgRepository, out: &mut Output<W>) -> Result<()> {
    repo.ensure_schema()
        .await
        .context("Failed to create schema")?;
    out.success("Schema ready (inventory, duties, name_catalog)")
}
