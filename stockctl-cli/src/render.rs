//! Terminal output: plain tables, pretty JSON, status lines

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use stockctl_core::{Duty, InventoryItem, LowStockRow, NameSuggestion};

/// A record that can be printed as one table row
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    /// Cell text in `COLUMNS` order; absent values are empty strings.
    fn cells(&self) -> Vec<String>;
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl TableRow for InventoryItem {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "item",
        "quantity",
        "category",
        "location_type",
        "aisle",
        "position",
        "barcode",
        "last_ordered",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.item.clone(),
            self.quantity.to_string(),
            text(&self.category),
            self.location_type.clone(),
            text(&self.aisle),
            text(&self.position),
            text(&self.barcode),
            self.last_ordered.to_string(),
        ]
    }
}

impl TableRow for LowStockRow {
    const COLUMNS: &'static [&'static str] = &["id", "item", "quantity", "category"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.item.clone(),
            self.quantity.to_string(),
            text(&self.category),
        ]
    }
}

impl TableRow for Duty {
    const COLUMNS: &'static [&'static str] = &["id", "task", "completed", "date"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.task.clone(),
            self.completed.to_string(),
            self.date.to_string(),
        ]
    }
}

impl TableRow for NameSuggestion {
    const COLUMNS: &'static [&'static str] = &["name"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

/// Command output sink
///
/// Listings go out as a table or, with `--json`, as a pretty JSON array.
/// Status lines are plain text either way.
pub struct Output<W: Write> {
    writer: W,
    json: bool,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { writer, json }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn rows<T: TableRow + Serialize>(&mut self, rows: &[T]) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut self.writer, rows)?;
            writeln!(self.writer)?;
            return Ok(());
        }

        if rows.is_empty() {
            return self.line("No rows.");
        }

        let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();
        let mut widths: Vec<usize> = T::COLUMNS.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = T::COLUMNS.iter().map(|c| c.to_string()).collect();
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        self.table_line(&header, &widths)?;
        self.table_line(&separator, &widths)?;
        for row in &cells {
            self.table_line(row, &widths)?;
        }
        Ok(())
    }

    fn table_line(&mut self, cells: &[String], widths: &[usize]) -> Result<()> {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        writeln!(self.writer, "{}", padded.join("  ").trim_end())?;
        Ok(())
    }

    pub fn line(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }

    pub fn success(&mut self, message: impl Display) -> Result<()> {
        self.line(format_args!("✓ {message}"))
    }

    pub fn warning(&mut self, message: impl Display) -> Result<()> {
        self.line(format_args!("⚠ {message}"))
    }

    /// Report an update by id: zero affected rows means the id was not found.
    pub fn affected(&mut self, count: u64, done: impl Display, what: impl Display) -> Result<()> {
        if count == 0 {
            self.warning(format_args!("{what} not found"))
        } else {
            self.success(format_args!("{done} {what}"))
        }
    }
}
