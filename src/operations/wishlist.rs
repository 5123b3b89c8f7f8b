//! Per-user wishlist operations, one flat file per user.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::wishlist::WishlistLine;
use crate::operations::catalog;
use crate::store::{self, RewriteAction, TableRecord};

fn require_user(user_id: u32) -> Result<()> {
    if user_id == 0 {
        return Err(ShopError::Validation(
            "wishlist requires a valid user id".to_string(),
        ));
    }
    Ok(())
}

/// Add a product to the wishlist. Adding something already on the list is
/// a success, not an error.
pub fn add_to_wishlist(config: &Config, user_id: u32, product_id: u32) -> Result<()> {
    require_user(user_id)?;
    if catalog::get_product(config, product_id).is_none() {
        return Err(ShopError::ProductNotFound { id: product_id });
    }

    let wishlist = config.wishlist_path(user_id);
    let already = store::find_first(&wishlist, |l: &WishlistLine| l.product_id == product_id);
    if already.is_some() {
        debug!(user_id, product_id, "already on wishlist");
        return Ok(());
    }
    store::append_record(&wishlist, &WishlistLine { product_id })?;
    debug!(user_id, product_id, "wishlist entry added");
    Ok(())
}

/// Drop a product from the wishlist.
pub fn remove_from_wishlist(config: &Config, user_id: u32, product_id: u32) -> Result<()> {
    require_user(user_id)?;
    let wishlist = config.wishlist_path(user_id);
    if !wishlist.exists() {
        return Err(ShopError::NotInWishlist { id: product_id });
    }
    let found = store::rewrite_where(&wishlist, |line| {
        match WishlistLine::parse_line(line) {
            Ok(existing) if existing.product_id == product_id => RewriteAction::Drop,
            _ => RewriteAction::Keep,
        }
    })?;
    if !found {
        return Err(ShopError::NotInWishlist { id: product_id });
    }
    Ok(())
}

/// One wishlist entry joined with the product table.
#[derive(Debug, Serialize)]
pub struct WishlistItem {
    pub product_id: u32,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
}

/// Read the wishlist and join each entry with the product table.
pub fn view_wishlist(config: &Config, user_id: u32) -> Result<Vec<WishlistItem>> {
    require_user(user_id)?;
    let lines: Vec<WishlistLine> = store::scan_all(&config.wishlist_path(user_id));
    Ok(lines
        .into_iter()
        .map(|line| {
            let product = catalog::get_product(config, line.product_id);
            WishlistItem {
                product_id: line.product_id,
                name: product.as_ref().map(|p| p.name.clone()),
                category: product.as_ref().map(|p| p.category.clone()),
                price: product.as_ref().map(|p| p.price),
                rating: product.as_ref().map(|p| p.rating),
            }
        })
        .collect())
}
