//! Product catalog operations: create, look up, search, edit, remove,
//! and the admin inventory report.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::product::{Product, ProductDraft};
use crate::store::{self, next_id, RewriteAction, TableRecord};

/// Combined search filter; unset fields do not constrain.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    /// Case-insensitive name substring.
    pub name_contains: Option<String>,
    /// Case-insensitive category equality.
    pub category: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Products rated at least this much (0.0 - 5.0).
    pub min_rating: Option<f64>,
}

impl ProductFilter {
    fn validate(&self) -> Result<()> {
        let min = self.price_min.unwrap_or(0.0);
        let max = self.price_max.unwrap_or(f64::INFINITY);
        if min < 0.0 || self.price_max.is_some_and(|m| m < 0.0) || min > max {
            return Err(ShopError::InvalidPriceRange { min, max });
        }
        if let Some(rating) = self.min_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ShopError::InvalidRating {
                    rating: rating as i64,
                });
            }
        }
        Ok(())
    }
}

fn validate_draft(draft: &ProductDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(ShopError::EmptyField { field: "name" });
    }
    if draft.price < 0.0 {
        return Err(ShopError::Validation(format!(
            "price must be non-negative (got {})",
            draft.price
        )));
    }
    Ok(())
}

/// Add a product to the catalog. The rating starts at 0.0 and only moves
/// through reviews. Returns the newly allocated id.
pub fn add_product(config: &Config, draft: &ProductDraft) -> Result<u32> {
    validate_draft(draft)?;
    let id = next_id(&config.products_path, config.settings.ids.product_base);
    let product = Product {
        id,
        name: draft.name.clone(),
        category: draft.category.clone(),
        price: draft.price,
        rating: 0.0,
        stock: draft.stock,
    };
    store::append_record(&config.products_path, &product)?;
    debug!(id, name = %product.name, "product added");
    Ok(id)
}

/// Point lookup by id.
#[must_use]
pub fn get_product(config: &Config, id: u32) -> Option<Product> {
    store::find_first(&config.products_path, |p: &Product| p.id == id)
}

/// Every product, in file order.
#[must_use]
pub fn list_products(config: &Config) -> Vec<Product> {
    store::scan_all(&config.products_path)
}

/// Scan the catalog with a combined filter. Invalid ranges are rejected
/// before the scan; an absent table yields an empty result.
pub fn search_products(config: &Config, filter: &ProductFilter) -> Result<Vec<Product>> {
    filter.validate()?;
    let name_query = filter.name_contains.as_deref().map(str::to_lowercase);
    let category_query = filter.category.as_deref().map(str::to_lowercase);

    Ok(store::scan_where(&config.products_path, |p: &Product| {
        if let Some(query) = &name_query {
            if !p.name.to_lowercase().contains(query) {
                return false;
            }
        }
        if let Some(query) = &category_query {
            if p.category.to_lowercase() != *query {
                return false;
            }
        }
        if filter.price_min.is_some_and(|min| p.price < min) {
            return false;
        }
        if filter.price_max.is_some_and(|max| p.price > max) {
            return false;
        }
        if filter.min_rating.is_some_and(|min| p.rating < min) {
            return false;
        }
        true
    }))
}

/// Replace a product's caller-editable fields, preserving the stored
/// rating. Lines that fail to parse pass through untouched.
pub fn edit_product(config: &Config, id: u32, draft: &ProductDraft) -> Result<()> {
    validate_draft(draft)?;
    let found = store::rewrite_where(&config.products_path, |line| {
        match Product::parse_line(line) {
            Ok(existing) if existing.id == id => {
                let updated = Product {
                    id,
                    name: draft.name.clone(),
                    category: draft.category.clone(),
                    price: draft.price,
                    rating: existing.rating,
                    stock: draft.stock,
                };
                RewriteAction::Replace(updated.to_line())
            }
            _ => RewriteAction::Keep,
        }
    })?;
    if !found {
        return Err(ShopError::ProductNotFound { id });
    }
    debug!(id, "product edited");
    Ok(())
}

/// Remove a product from the catalog.
pub fn remove_product(config: &Config, id: u32) -> Result<()> {
    let found = store::rewrite_where(&config.products_path, |line| {
        match Product::parse_line(line) {
            Ok(existing) if existing.id == id => RewriteAction::Drop,
            _ => RewriteAction::Keep,
        }
    })?;
    if !found {
        return Err(ShopError::ProductNotFound { id });
    }
    debug!(id, "product removed");
    Ok(())
}

/// Stock classification for the inventory report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Ok,
    Low,
    Out,
}

/// One row of the inventory report.
#[derive(Debug, Serialize)]
pub struct InventoryRow {
    #[serde(flatten)]
    pub product: Product,
    pub stock_level: StockLevel,
}

/// The whole catalog with stock flags, for the admin dashboard.
#[must_use]
pub fn inventory(config: &Config) -> Vec<InventoryRow> {
    let threshold = config.settings.inventory.low_stock_threshold;
    list_products(config)
        .into_iter()
        .map(|product| {
            let stock_level = if product.stock == 0 {
                StockLevel::Out
            } else if product.stock < threshold {
                StockLevel::Low
            } else {
                StockLevel::Ok
            };
            InventoryRow {
                product,
                stock_level,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> Config {
        Config::new(tmp.path().join("data"))
    }

    fn draft(name: &str, category: &str, price: f64, stock: u32) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }

    #[test]
    fn first_product_gets_base_id() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let id = add_product(&config, &draft("Widget", "Misc", 9.99, 5)).unwrap();
        assert_eq!(id, 101);

        let products = list_products(&config);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 101);
        assert!((products[0].rating - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ids_increase_monotonically() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        assert_eq!(add_product(&config, &draft("A", "X", 1.0, 1)).unwrap(), 101);
        assert_eq!(add_product(&config, &draft("B", "X", 2.0, 1)).unwrap(), 102);
    }

    #[test]
    fn empty_name_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        assert!(matches!(
            add_product(&config, &draft("  ", "X", 1.0, 1)),
            Err(ShopError::EmptyField { field: "name" })
        ));
    }

    #[test]
    fn edit_preserves_rating() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let id = add_product(&config, &draft("Widget", "Misc", 9.99, 5)).unwrap();

        // Simulate a review having set the rating.
        store::rewrite_where(&config.products_path, |line| {
            let mut p = Product::parse_line(line).unwrap();
            p.rating = 4.5;
            RewriteAction::Replace(p.to_line())
        })
        .unwrap();

        edit_product(&config, id, &draft("Widget v2", "Gadgets", 12.50, 8)).unwrap();
        let product = get_product(&config, id).unwrap();
        assert_eq!(product.name, "Widget v2");
        assert_eq!(product.category, "Gadgets");
        assert!((product.price - 12.50).abs() < f64::EPSILON);
        assert_eq!(product.stock, 8);
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn edit_missing_product_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        add_product(&config, &draft("Widget", "Misc", 9.99, 5)).unwrap();
        assert!(matches!(
            edit_product(&config, 999, &draft("X", "Y", 1.0, 1)),
            Err(ShopError::ProductNotFound { id: 999 })
        ));
    }

    #[test]
    fn remove_drops_only_the_target() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let a = add_product(&config, &draft("A", "X", 1.0, 1)).unwrap();
        let b = add_product(&config, &draft("B", "X", 2.0, 1)).unwrap();
        remove_product(&config, a).unwrap();
        assert!(get_product(&config, a).is_none());
        assert!(get_product(&config, b).is_some());
    }

    #[test]
    fn search_by_name_is_case_insensitive_substring() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        add_product(&config, &draft("Gaming Mouse", "Electronics", 49.99, 5)).unwrap();
        add_product(&config, &draft("Desk", "Furniture", 89.00, 2)).unwrap();

        let filter = ProductFilter {
            name_contains: Some("MOUSE".into()),
            ..ProductFilter::default()
        };
        let hits = search_products(&config, &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Gaming Mouse");
    }

    #[test]
    fn search_by_category_and_price_range() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        add_product(&config, &draft("Mouse", "Electronics", 19.99, 5)).unwrap();
        add_product(&config, &draft("Monitor", "Electronics", 199.99, 3)).unwrap();
        add_product(&config, &draft("Desk", "Furniture", 89.00, 2)).unwrap();

        let filter = ProductFilter {
            category: Some("electronics".into()),
            price_max: Some(100.0),
            ..ProductFilter::default()
        };
        let hits = search_products(&config, &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Mouse");
    }

    #[test]
    fn invalid_price_range_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let filter = ProductFilter {
            price_min: Some(50.0),
            price_max: Some(10.0),
            ..ProductFilter::default()
        };
        assert!(matches!(
            search_products(&config, &filter),
            Err(ShopError::InvalidPriceRange { .. })
        ));
    }

    #[test]
    fn search_missing_table_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let hits = search_products(&config, &ProductFilter::default()).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn inventory_flags_stock_levels() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        add_product(&config, &draft("Plenty", "X", 1.0, 10)).unwrap();
        add_product(&config, &draft("Scarce", "X", 1.0, 2)).unwrap();
        add_product(&config, &draft("Gone", "X", 1.0, 0)).unwrap();

        let rows = inventory(&config);
        assert_eq!(rows[0].stock_level, StockLevel::Ok);
        assert_eq!(rows[1].stock_level, StockLevel::Low);
        assert_eq!(rows[2].stock_level, StockLevel::Out);
    }
}
