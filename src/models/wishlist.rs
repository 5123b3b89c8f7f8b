use serde::Serialize;

use crate::error::Result;
use crate::store::{self, TableRecord};

/// One line of a per-user wishlist file: just a product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WishlistLine {
    pub product_id: u32,
}

impl TableRecord for WishlistLine {
    const TABLE: &'static str = "wishlist";

    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Ok(Self {
            product_id: store::req_u32(&fields, 0, Self::TABLE)?,
        })
    }

    fn to_line(&self) -> String {
        self.product_id.to_string()
    }
}
