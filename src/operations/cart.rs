//! Per-user shopping cart operations. Each cart is its own flat file,
//! keyed by user id in the filename; nothing crosses users.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::cart::CartLine;
use crate::operations::catalog;
use crate::store::{self, RewriteAction, TableRecord};

fn require_user(user_id: u32) -> Result<()> {
    if user_id == 0 {
        return Err(ShopError::Validation(
            "cart requires a valid user id".to_string(),
        ));
    }
    Ok(())
}

/// Quantity of one product already sitting in the cart.
fn quantity_in_cart(config: &Config, user_id: u32, product_id: u32) -> u32 {
    store::find_first(&config.cart_path(user_id), |l: &CartLine| {
        l.product_id == product_id
    })
    .map_or(0, |l| l.quantity)
}

/// Add a quantity of a product to the cart, merging with any existing
/// line. The combined quantity may not exceed the current stock.
pub fn add_to_cart(config: &Config, user_id: u32, product_id: u32, quantity: u32) -> Result<()> {
    require_user(user_id)?;
    if quantity == 0 {
        return Err(ShopError::InvalidQuantity);
    }
    let product =
        catalog::get_product(config, product_id).ok_or(ShopError::ProductNotFound { id: product_id })?;

    let already = quantity_in_cart(config, user_id, product_id);
    if already + quantity > product.stock {
        return Err(ShopError::InsufficientStock {
            id: product_id,
            available: product.stock,
            requested: already + quantity,
        });
    }

    let cart = config.cart_path(user_id);
    if cart.exists() {
        let merged = store::rewrite_where(&cart, |line| match CartLine::parse_line(line) {
            Ok(existing) if existing.product_id == product_id => {
                let updated = CartLine {
                    product_id,
                    quantity: existing.quantity + quantity,
                };
                RewriteAction::Replace(updated.to_line())
            }
            _ => RewriteAction::Keep,
        })?;
        if merged {
            debug!(user_id, product_id, quantity, "cart line merged");
            return Ok(());
        }
    }
    store::append_record(
        &cart,
        &CartLine {
            product_id,
            quantity,
        },
    )?;
    debug!(user_id, product_id, quantity, "cart line added");
    Ok(())
}

/// Drop a product's line from the cart entirely.
pub fn remove_from_cart(config: &Config, user_id: u32, product_id: u32) -> Result<()> {
    require_user(user_id)?;
    let cart = config.cart_path(user_id);
    if !cart.exists() {
        return Err(ShopError::NotInCart { id: product_id });
    }
    let found = store::rewrite_where(&cart, |line| match CartLine::parse_line(line) {
        Ok(existing) if existing.product_id == product_id => RewriteAction::Drop,
        _ => RewriteAction::Keep,
    })?;
    if !found {
        return Err(ShopError::NotInCart { id: product_id });
    }
    Ok(())
}

/// One cart line joined with the product table. A product that vanished
/// from the catalog keeps its line but loses the detail columns.
#[derive(Debug, Serialize)]
pub struct CartItem {
    pub product_id: u32,
    pub quantity: u32,
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    pub subtotal: Option<f64>,
}

/// The cart as shown to the user, with a grand total.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub user_id: u32,
    pub items: Vec<CartItem>,
    pub total: f64,
}

/// Read the cart and join each line with the product table.
pub fn view_cart(config: &Config, user_id: u32) -> Result<CartView> {
    require_user(user_id)?;
    let lines: Vec<CartLine> = store::scan_all(&config.cart_path(user_id));

    let mut items = Vec::with_capacity(lines.len());
    let mut total = 0.0;
    for line in lines {
        let product = catalog::get_product(config, line.product_id);
        let unit_price = product.as_ref().map(|p| p.price);
        let subtotal = unit_price.map(|price| round2(price * f64::from(line.quantity)));
        total += subtotal.unwrap_or(0.0);
        items.push(CartItem {
            product_id: line.product_id,
            quantity: line.quantity,
            name: product.map(|p| p.name),
            unit_price,
            subtotal,
        });
    }
    Ok(CartView {
        user_id,
        items,
        total: round2(total),
    })
}

/// Sum of price x quantity over the cart, skipping vanished products.
pub fn cart_total(config: &Config, user_id: u32) -> Result<f64> {
    Ok(view_cart(config, user_id)?.total)
}

/// Truncate the cart file.
pub fn clear_cart(config: &Config, user_id: u32) -> Result<()> {
    require_user(user_id)?;
    let cart = config.cart_path(user_id);
    if let Some(parent) = cart.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::File::create(&cart)?;
    debug!(user_id, "cart cleared");
    Ok(())
}

/// Whether the cart holds any parseable line.
#[must_use]
pub fn is_empty(config: &Config, user_id: u32) -> bool {
    store::find_first(&config.cart_path(user_id), |_: &CartLine| true).is_none()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
