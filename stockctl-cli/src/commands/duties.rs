//! Duty checklist commands

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use stockctl_core::Repository;

use crate::render::Output;

#[derive(Parser, Debug)]
pub struct AddDutyArgs {
    /// Task description
    #[arg(long)]
    pub task: String,
}

#[derive(Parser, Debug)]
pub struct CompleteDutyArgs {
    /// Duty id
    #[arg(long)]
    pub id: i64,
}

pub async fn run_list_duties<W: Write>(repo: &dyn Repository, out: &mut Output<W>) -> Result<()> {
    let duties = repo.list_duties().await.context("Failed to list duties")?;
    out.rows(&duties)
}

pub async fn run_add_duty<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: AddDutyArgs,
) -> Result<()> {
    repo.add_duty(&args.task)
        .await
        .context("Failed to add duty")?;
    out.success(format_args!("Added duty {}", args.task.trim()))
}

pub async fn run_complete_duty<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: CompleteDutyArgs,
) -> Result<()> {
    let changed = repo
        .complete_duty(args.id)
        .await
        .context("Failed to complete duty")?;
    out.affected(changed, "Completed", format_args!("duty {}", args.id))
}
