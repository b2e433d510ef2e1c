//! CSV export of low-stock rows

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use stockctl_core::LowStockRow;

const HEADER: [&str; 4] = ["id", "item", "quantity", "category"];

/// Write a header and one record per row.
pub fn write_low_stock<W: Write>(writer: W, rows: &[LowStockRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for row in rows {
        let id = row.id.to_string();
        let quantity = row.quantity.to_string();
        csv.write_record([
            id.as_str(),
            row.item.as_str(),
            quantity.as_str(),
            row.category.as_deref().unwrap_or(""),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Export rows to `path`, returning how many were written.
///
/// With no rows the file is not created.
pub fn export_low_stock(path: &Path, rows: &[LowStockRow]) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_low_stock(file, rows).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(rows.len())
}
