//! Server-rendered HTML pages
//!
//! Plain string templates; every value taken from the store goes through
//! [`escape`].

use std::fmt::Write;

use stockctl_core::{InventoryItem, Location};

const STYLE: &str = r#"
      body { font-family: system-ui, Arial, sans-serif; max-width: 960px; margin: 32px auto; padding: 0 16px; }
      form { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 16px 0; }
      label { display: block; font-size: 12px; color: #444; }
      input, select, button { padding: 8px; font-size: 14px; width: 100%; box-sizing: border-box; }
      .full { grid-column: 1 / -1; }
      table { border-collapse: collapse; width: 100%; margin-top: 16px; }
      th, td { border: 1px solid #ddd; padding: 6px 8px; font-size: 13px; text-align: left; }
      th { background: #f5f5f5; }
      .empty { background: #fff8e1; padding: 8px; border: 1px solid #ffe082; }
      nav a { margin-right: 12px; }
"#;

const COLUMNS: [&str; 9] = [
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

/// Escape text for use in element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <style>{STYLE}</style>
  </head>
  <body>
    <h1>{title}</h1>
    <nav>
      <a href="/">Inventory</a>
      <a href="/topstock">Topstock</a>
      <a href="/items">Items (JSON)</a>
      <a href="/low?threshold=3">Low stock &lt;= 3 (JSON)</a>
    </nav>
{body}
  </body>
</html>
"#,
        title = escape(title),
    )
}

/// Table of items, or a notice when there are none
pub fn items_table(items: &[InventoryItem]) -> String {
    if items.is_empty() {
        return r#"    <p class="empty">No rows.</p>"#.to_string();
    }

    let mut html = String::from("    <table>\n      <thead><tr>");
    for column in COLUMNS {
        let _ = write!(html, "<th>{column}</th>");
    }
    html.push_str("</tr></thead>\n      <tbody>\n");

    for item in items {
        let cells = [
            item.id.to_string(),
            item.item.clone(),
            item.quantity.to_string(),
            item.category.clone().unwrap_or_default(),
            item.location_type.clone(),
            item.aisle.clone().unwrap_or_default(),
            item.position.clone().unwrap_or_default(),
            item.barcode.clone().unwrap_or_default(),
            item.last_ordered.to_string(),
        ];
        html.push_str("        <tr>");
        for cell in &cells {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("      </tbody>\n    </table>");
    html
}

fn add_form() -> String {
    let mut options = String::new();
    for location in Location::ALL {
        let selected = if location == Location::default() { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{value}"{selected}>{value}</option>"#,
            value = location.as_str()
        );
    }

    format!(
        r#"    <h2>Add Inventory</h2>
    <form method="post" action="/add">
      <div><label for="item">Item</label><input id="item" name="item" required /></div>
      <div><label for="quantity">Qty</label><input id="quantity" name="quantity" type="number" value="1" required /></div>
      <div><label for="category">Category</label><input id="category" name="category" /></div>
      <div><label for="aisle">Aisle</label><input id="aisle" name="aisle" placeholder="A4" /></div>
      <div><label for="position">Position</label><input id="position" name="position" placeholder="Top-Right" /></div>
      <div><label for="location_type">Location</label><select id="location_type" name="location_type">{options}</select></div>
      <div class="full"><label for="barcode">Barcode</label><input id="barcode" name="barcode" /></div>
      <div class="full"><label for="image_url">Image URL (optional)</label><input id="image_url" name="image_url" /></div>
      <div class="full"><button type="submit">Add Item</button></div>
    </form>"#
    )
}

/// `GET /`: add form plus the active inventory
pub fn index_page(items: &[InventoryItem]) -> String {
    let body = format!(
        "{}\n    <h2>Active Inventory</h2>\n{}",
        add_form(),
        items_table(items)
    );
    layout("Stockroom Organizer", &body)
}

/// `GET /topstock`: active items kept in overstock
pub fn topstock_page(items: &[InventoryItem]) -> String {
    let body = format!("    <h2>Overstock</h2>\n{}", items_table(items));
    layout("Topstock", &body)
}
