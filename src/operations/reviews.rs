//! Product reviews: one per (user, product), feeding the product's stored
//! average rating.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::product::Product;
use crate::models::review::{sanitize_comment, Review};
use crate::operations::{catalog, orders};
use crate::store::{self, RewriteAction, TableRecord};

/// Add a review and refresh the product's average rating.
///
/// A failed rating refresh does not undo the review; the review row is the
/// source of truth and the stored average is derived.
pub fn add_review(
    config: &Config,
    product_id: u32,
    user_id: u32,
    rating: u32,
    comment: &str,
) -> Result<()> {
    if product_id == 0 || user_id == 0 {
        return Err(ShopError::Validation(
            "review requires a valid product id and user id".to_string(),
        ));
    }
    if !(1..=5).contains(&rating) {
        return Err(ShopError::InvalidRating {
            rating: i64::from(rating),
        });
    }
    if catalog::get_product(config, product_id).is_none() {
        return Err(ShopError::ProductNotFound { id: product_id });
    }
    let existing = store::find_first(&config.reviews_path, |r: &Review| {
        r.product_id == product_id && r.user_id == user_id
    });
    if existing.is_some() {
        return Err(ShopError::DuplicateReview {
            product_id,
            user_id,
        });
    }

    let review = Review {
        product_id,
        user_id,
        rating,
        comment: sanitize_comment(comment),
    };
    store::append_record(&config.reviews_path, &review)?;
    info!(product_id, user_id, rating, "review added");

    if let Err(e) = refresh_product_rating(config, product_id) {
        warn!(product_id, "review saved but rating refresh failed: {e}");
    }
    Ok(())
}

/// Recompute a product's average over its in-range review rows, rounded
/// to one decimal, and rewrite the product row with it.
fn refresh_product_rating(config: &Config, product_id: u32) -> Result<()> {
    let ratings: Vec<Review> = store::scan_where(&config.reviews_path, |r: &Review| {
        r.product_id == product_id && (1..=5).contains(&r.rating)
    });
    let average = if ratings.is_empty() {
        0.0
    } else {
        let sum: u32 = ratings.iter().map(|r| r.rating).sum();
        f64::from(sum) / ratings.len() as f64
    };
    let average = (average * 10.0).round() / 10.0;

    let found = store::rewrite_where(&config.products_path, |line| {
        match Product::parse_line(line) {
            Ok(mut product) if product.id == product_id => {
                product.rating = average;
                RewriteAction::Replace(product.to_line())
            }
            _ => RewriteAction::Keep,
        }
    })?;
    if !found {
        warn!(product_id, "product missing during rating refresh");
    }
    Ok(())
}

/// The reviews of one product plus the average of the displayed rows.
#[derive(Debug, Serialize)]
pub struct ReviewsView {
    pub product_id: u32,
    pub count: usize,
    pub average: f64,
    pub reviews: Vec<Review>,
}

/// All reviews for a product, in file order.
#[must_use]
pub fn reviews_for_product(config: &Config, product_id: u32) -> ReviewsView {
    let reviews: Vec<Review> =
        store::scan_where(&config.reviews_path, |r: &Review| r.product_id == product_id);
    let in_range: Vec<u32> = reviews
        .iter()
        .map(|r| r.rating)
        .filter(|r| (1..=5).contains(r))
        .collect();
    let average = if in_range.is_empty() {
        0.0
    } else {
        let sum: u32 = in_range.iter().sum();
        (f64::from(sum) / in_range.len() as f64 * 10.0).round() / 10.0
    };
    ReviewsView {
        product_id,
        count: reviews.len(),
        average,
        reviews,
    }
}

/// Products the user has ordered but not yet reviewed, in order history
/// order.
#[must_use]
pub fn reviewable_products(config: &Config, user_id: u32) -> Vec<u32> {
    let mut product_ids = Vec::new();
    for order in orders::orders_for_user(config, user_id) {
        for item in &order.items {
            if !product_ids.contains(&item.product_id) {
                product_ids.push(item.product_id);
            }
        }
    }
    product_ids.retain(|&product_id| {
        store::find_first(&config.reviews_path, |r: &Review| {
            r.product_id == product_id && r.user_id == user_id
        })
        .is_none()
    });
    product_ids
}
