use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Products table filename.
const PRODUCTS_FILE: &str = "products.txt";
/// Users table filename.
const USERS_FILE: &str = "users.txt";
/// Payments table filename.
const PAYMENTS_FILE: &str = "payments.txt";
/// Orders table, kept in its own subdirectory.
const ORDERS_FILE: &str = "orders/orders.txt";
/// Reviews table, kept in its own subdirectory.
const REVIEWS_FILE: &str = "reviews/reviews.txt";
/// Directory of per-user cart files.
const CART_DIR: &str = "cart";
/// Directory of per-user wishlist files.
const WISHLIST_DIR: &str = "wishlist";
/// Settings filename.
const CONFIG_FILE: &str = "config.toml";

/// Table layout resolved from a data directory, plus user settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding every table.
    pub data_dir: PathBuf,
    /// Path to the products table.
    pub products_path: PathBuf,
    /// Path to the users table.
    pub users_path: PathBuf,
    /// Path to the orders table.
    pub orders_path: PathBuf,
    /// Path to the payments table.
    pub payments_path: PathBuf,
    /// Path to the reviews table.
    pub reviews_path: PathBuf,
    /// Path to the settings file.
    pub config_path: PathBuf,
    cart_dir: PathBuf,
    wishlist_dir: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: StoreSettings,
}

/// User-configurable settings from data/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// ID allocation bases.
    pub ids: IdSettings,
    /// Inventory reporting thresholds.
    pub inventory: InventorySettings,
}

/// Base value handed out when a table holds no parseable IDs yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdSettings {
    pub product_base: u32,
    pub user_base: u32,
    pub order_base: u32,
    pub payment_base: u32,
}

impl Default for IdSettings {
    fn default() -> Self {
        Self {
            product_base: 101,
            user_base: 1,
            order_base: 1001,
            payment_base: 5001,
        }
    }
}

/// Inventory reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Stock strictly below this (and above zero) is flagged as low.
    pub low_stock_threshold: u32,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
        }
    }
}

impl Config {
    /// Resolve the table layout under a given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let config_path = data_dir.join(CONFIG_FILE);

        // Settings are optional; a missing or invalid file means defaults.
        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            products_path: data_dir.join(PRODUCTS_FILE),
            users_path: data_dir.join(USERS_FILE),
            orders_path: data_dir.join(ORDERS_FILE),
            payments_path: data_dir.join(PAYMENTS_FILE),
            reviews_path: data_dir.join(REVIEWS_FILE),
            cart_dir: data_dir.join(CART_DIR),
            wishlist_dir: data_dir.join(WISHLIST_DIR),
            config_path,
            data_dir,
            settings,
        }
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<StoreSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Create the data directory layout if any part of it is missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        if let Some(parent) = self.orders_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(parent) = self.reviews_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(&self.cart_dir)?;
        std::fs::create_dir_all(&self.wishlist_dir)?;
        Ok(())
    }

    /// Per-user cart file, keyed by user id in the filename.
    #[must_use]
    pub fn cart_path(&self, user_id: u32) -> PathBuf {
        self.cart_dir.join(format!("cart_{user_id}.txt"))
    }

    /// Per-user wishlist file, keyed by user id in the filename.
    #[must_use]
    pub fn wishlist_path(&self, user_id: u32) -> PathBuf {
        self.wishlist_dir.join(format!("wishlist_{user_id}.txt"))
    }
}
