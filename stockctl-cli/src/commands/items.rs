//! Inventory commands

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stockctl_core::{add_item, Location, NewItem, Repository, DEFAULT_LOW_STOCK_THRESHOLD};

use crate::export;
use crate::render::Output;

#[derive(Parser, Debug)]
pub struct AddItemArgs {
    /// Display name
    #[arg(long)]
    pub item: String,

    /// Quantity on hand
    #[arg(long, allow_negative_numbers = true)]
    pub qty: i32,

    /// Category, e.g. Vodka
    #[arg(long)]
    pub cat: Option<String>,

    /// Aisle label, e.g. A4
    #[arg(long)]
    pub aisle: Option<String>,

    /// Position within the aisle
    #[arg(long)]
    pub pos: Option<String>,

    /// Where the stock lives (shelf|overstock)
    #[arg(long, default_value_t = Location::Overstock)]
    pub loc: Location,

    /// UPC/EAN
    #[arg(long)]
    pub barcode: Option<String>,

    /// Image URL
    #[arg(long)]
    pub img: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UpdateQtyArgs {
    /// Item id
    #[arg(long)]
    pub id: i64,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    pub qty: i32,
}

#[derive(Parser, Debug)]
pub struct LowStockArgs {
    /// Report items with quantity at or below this value
    #[arg(
        long,
        default_value_t = DEFAULT_LOW_STOCK_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub threshold: i32,
}

#[derive(Parser, Debug)]
pub struct ExportLowStockArgs {
    /// Report items with quantity at or below this value
    #[arg(
        long,
        default_value_t = DEFAULT_LOW_STOCK_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub threshold: i32,

    /// Output CSV path
    #[arg(long = "csv", value_name = "PATH")]
    pub csv_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ItemIdArgs {
    /// Item id
    #[arg(long)]
    pub id: i64,
}

#[derive(Parser, Debug)]
pub struct SuggestNamesArgs {
    /// Substring to look for (matched literally, case-sensitive)
    #[arg(long)]
    pub q: String,
}

pub async fn run_list_items<W: Write>(repo: &dyn Repository, out: &mut Output<W>) -> Result<()> {
    let items = repo
        .list_active_items()
        .await
        .context("Failed to list inventory")?;
    out.rows(&items)
}

pub async fn run_add_item<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: AddItemArgs,
) -> Result<()> {
    let item = NewItem::new(&args.item, args.qty, args.loc)?
        .with_category(args.cat)
        .with_placement(args.aisle, args.pos)
        .with_barcode(args.barcode)
        .with_image_url(args.img);

    let outcome = add_item(repo, &item)
        .await
        .with_context(|| format!("Failed to add '{}'", item.name()))?;

    out.success(format_args!(
        "Added {} (qty {}) @ {}",
        item.name(),
        item.quantity,
        item.placement()
    ))?;
    if !outcome.name_remembered {
        out.warning("name not saved for suggestions")?;
    }
    Ok(())
}

pub async fn run_update_qty<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: UpdateQtyArgs,
) -> Result<()> {
    let changed = repo
        .update_quantity(args.id, args.qty)
        .await
        .context("Failed to update quantity")?;
    out.affected(
        changed,
        format_args!("Set qty {} for", args.qty),
        format_args!("item {}", args.id),
    )
}

pub async fn run_low_stock<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: LowStockArgs,
) -> Result<()> {
    let rows = repo
        .low_stock(args.threshold)
        .await
        .context("Failed to query low stock")?;
    out.rows(&rows)
}

pub async fn run_export_low_stock<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: ExportLowStockArgs,
) -> Result<()> {
    let rows = repo
        .low_stock(args.threshold)
        .await
        .context("Failed to query low stock")?;

    match export::export_low_stock(&args.csv_path, &rows)? {
        0 => out.warning(format_args!(
            "No items at or below {}; nothing written",
            args.threshold
        )),
        count => out.success(format_args!(
            "Exported {} rows -> {}",
            count,
            args.csv_path.display()
        )),
    }
}

pub async fn run_archive_item<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: ItemIdArgs,
) -> Result<()> {
    let changed = repo
        .archive_item(args.id)
        .await
        .context("Failed to archive item")?;
    out.affected(changed, "Archived", format_args!("item {}", args.id))
}

pub async fn run_unarchive_item<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: ItemIdArgs,
) -> Result<()> {
    let changed = repo
        .unarchive_item(args.id)
        .await
        .context("Failed to unarchive item")?;
    out.affected(changed, "Unarchived", format_args!("item {}", args.id))
}

pub async fn run_suggest_names<W: Write>(
    repo: &dyn Repository,
    out: &mut Output<W>,
    args: SuggestNamesArgs,
) -> Result<()> {
    let names = repo
        .suggest_names(&args.q)
        .await
        .context("Failed to suggest names")?;
    out.rows(&names)
}
