use serde::Serialize;

use tracing::warn;

use crate::error::Result;
use crate::store::{self, TableRecord};

/// One `productId:quantity` entry of an order's items field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub product_id: u32,
    pub quantity: u32,
}

/// One row of the orders table.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: u32,
    pub user_id: u32,
    pub items: Vec<LineItem>,
    /// Placement timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    pub status: String,
}

/// Serialize line items into the `prodId:qty|prodId:qty` mini-format.
#[must_use]
pub fn format_items(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}:{}", item.product_id, item.quantity))
        .collect::<Vec<_>>()
        .join("|")
}

/// Parse the items mini-format. Malformed segments are warned and skipped
/// so one bad pair does not lose the rest of the order.
#[must_use]
pub fn parse_items(raw: &str) -> Vec<LineItem> {
    let mut items = Vec::new();
    for segment in raw.split('|') {
        if segment.is_empty() {
            continue;
        }
        let mut parts = segment.splitn(2, ':');
        let id = parts.next().unwrap_or("").trim().parse::<u32>();
        let qty = parts.next().unwrap_or("").trim().parse::<u32>();
        match (id, qty) {
            (Ok(product_id), Ok(quantity)) => items.push(LineItem {
                product_id,
                quantity,
            }),
            _ => warn!("skipping malformed order item segment: {segment:?}"),
        }
    }
    items
}

impl TableRecord for Order {
    const TABLE: &'static str = "orders";

    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Ok(Self {
            id: store::req_u32(&fields, 0, Self::TABLE)?,
            user_id: store::req_u32(&fields, 1, Self::TABLE)?,
            items: parse_items(fields.get(2).copied().unwrap_or("")),
            date: store::opt_str(&fields, 3),
            status: store::opt_str(&fields, 4),
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.id,
            self.user_id,
            format_items(&self.items),
            self.date,
            self.status
        )
    }
}
