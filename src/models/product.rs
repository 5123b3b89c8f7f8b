use serde::Serialize;

use crate::error::Result;
use crate::store::{self, TableRecord};

/// One row of the product table.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    /// Unit price, stored to 2 decimal places.
    pub price: f64,
    /// Average review rating, stored to 1 decimal place. Only the review
    /// workflow writes this field.
    pub rating: f64,
    pub stock: u32,
}

/// Caller-supplied fields for creating or editing a product. The id is
/// allocated by the store and the rating only moves through reviews.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

impl TableRecord for Product {
    const TABLE: &'static str = "products";

    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Ok(Self {
            id: store::req_u32(&fields, 0, Self::TABLE)?,
            name: store::opt_str(&fields, 1),
            category: store::opt_str(&fields, 2),
            price: store::opt_f64(&fields, 3, Self::TABLE)?,
            rating: store::opt_f64(&fields, 4, Self::TABLE)?,
            stock: store::opt_u32(&fields, 5, Self::TABLE)?,
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{:.2},{:.1},{}",
            self.id, self.name, self.category, self.price, self.rating, self.stock
        )
    }
}
