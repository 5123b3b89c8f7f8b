//! Order operations, including the one multi-table workflow in the
//! system: placement reads the cart, decrements product stock, appends an
//! order row and clears the cart, in that order.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::cart::CartLine;
use crate::models::order::{LineItem, Order};
use crate::models::product::Product;
use crate::operations::{cart, catalog};
use crate::store::{self, next_id, RewriteAction, TableRecord};

/// Place an order from the user's cart.
///
/// The stock pass runs entirely in memory first: the product table is only
/// replaced once every line item clears, so a shortage aborts with all
/// files untouched. After the stock swap the order row is appended and the
/// cart truncated; a failure in those last steps leaves the decrement
/// committed (reported, but there is no cross-file rollback), and a
/// cart-clear failure alone does not fail the placed order.
pub fn place_order(config: &Config, user_id: u32) -> Result<Order> {
    if user_id == 0 {
        return Err(ShopError::Validation(
            "an order requires a valid user id".to_string(),
        ));
    }

    // Snapshot the cart before touching anything.
    let cart_lines: Vec<CartLine> = store::scan_all(&config.cart_path(user_id));
    if cart_lines.is_empty() {
        return Err(ShopError::EmptyCart);
    }
    let items: Vec<LineItem> = cart_lines
        .iter()
        .map(|line| LineItem {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    apply_stock_decrements(config, &cart_lines)?;

    let order = Order {
        id: next_id(&config.orders_path, config.settings.ids.order_base),
        user_id,
        items,
        date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        status: "Complete".to_string(),
    };
    store::append_record(&config.orders_path, &order)?;

    if let Err(e) = cart::clear_cart(config, user_id) {
        warn!(order_id = order.id, "order placed but cart not cleared: {e}");
    }

    info!(order_id = order.id, user_id, "order placed");
    Ok(order)
}

/// Build the replacement product table in memory and swap it in only if
/// every requested decrement stays non-negative. Rows the cart does not
/// touch are carried through verbatim, parseable or not.
fn apply_stock_decrements(config: &Config, cart_lines: &[CartLine]) -> Result<()> {
    let mut wanted = std::collections::BTreeMap::new();
    for line in cart_lines {
        *wanted.entry(line.product_id).or_insert(0u32) += line.quantity;
    }

    let content = std::fs::read_to_string(&config.products_path).map_err(|e| {
        warn!("cannot open product table for stock update: {e}");
        ShopError::Io(e)
    })?;

    let mut new_lines = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            new_lines.push(String::new());
            continue;
        }
        match Product::parse_line(line) {
            Ok(mut product) => {
                if let Some(quantity) = wanted.remove(&product.id) {
                    let Some(remaining) = product.stock.checked_sub(quantity) else {
                        return Err(ShopError::InsufficientStock {
                            id: product.id,
                            available: product.stock,
                            requested: quantity,
                        });
                    };
                    product.stock = remaining;
                    new_lines.push(product.to_line());
                } else {
                    new_lines.push(line.to_string());
                }
            }
            Err(_) => new_lines.push(line.to_string()),
        }
    }
    if let Some((&id, _)) = wanted.iter().next() {
        return Err(ShopError::ProductNotFound { id });
    }

    store::swap_in(&config.products_path, &new_lines)?;
    debug!("stock decremented for {} product(s)", cart_lines.len());
    Ok(())
}

/// One item of a tracked order, joined with the product table.
#[derive(Debug, Serialize)]
pub struct TrackedItem {
    pub product_id: u32,
    pub quantity: u32,
    pub name: Option<String>,
}

/// A single order with its items resolved to product names.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub id: u32,
    pub user_id: u32,
    pub date: String,
    pub status: String,
    pub items: Vec<TrackedItem>,
}

/// Look up one order and resolve its items. Products that have since
/// vanished from the catalog degrade to id-only rows.
pub fn track_order(config: &Config, id: u32) -> Result<OrderDetail> {
    let order = store::find_first(&config.orders_path, |o: &Order| o.id == id)
        .ok_or(ShopError::OrderNotFound { id })?;

    let items = order
        .items
        .iter()
        .map(|item| TrackedItem {
            product_id: item.product_id,
            quantity: item.quantity,
            name: catalog::get_product(config, item.product_id).map(|p| p.name),
        })
        .collect();

    Ok(OrderDetail {
        id: order.id,
        user_id: order.user_id,
        date: order.date,
        status: order.status,
        items,
    })
}

/// Every order, in file order.
#[must_use]
pub fn list_orders(config: &Config) -> Vec<Order> {
    store::scan_all(&config.orders_path)
}

/// Orders belonging to one user, in file order.
#[must_use]
pub fn orders_for_user(config: &Config, user_id: u32) -> Vec<Order> {
    store::scan_where(&config.orders_path, |o: &Order| o.user_id == user_id)
}

/// Replace an order's status field, leaving everything else as stored.
pub fn update_status(config: &Config, id: u32, status: &str) -> Result<()> {
    if status.trim().is_empty() {
        return Err(ShopError::EmptyField { field: "status" });
    }
    let found = store::rewrite_where(&config.orders_path, |line| match Order::parse_line(line) {
        Ok(mut order) if order.id == id => {
            order.status = status.to_string();
            RewriteAction::Replace(order.to_line())
        }
        _ => RewriteAction::Keep,
    })?;
    if !found {
        return Err(ShopError::OrderNotFound { id });
    }
    info!(order_id = id, status, "order status updated");
    Ok(())
}

/// Distinct product ids of an order, first occurrence order.
pub fn product_ids_for_order(config: &Config, id: u32) -> Result<Vec<u32>> {
    let order = store::find_first(&config.orders_path, |o: &Order| o.id == id)
        .ok_or(ShopError::OrderNotFound { id })?;
    let mut ids = Vec::new();
    for item in &order.items {
        if !ids.contains(&item.product_id) {
            ids.push(item.product_id);
        }
    }
    Ok(ids)
}
