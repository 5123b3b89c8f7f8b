use serde::Serialize;

use crate::error::Result;
use crate::store::{self, TableRecord};

/// One line of a per-user cart file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: u32,
    pub quantity: u32,
}

impl TableRecord for CartLine {
    const TABLE: &'static str = "cart";

    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Ok(Self {
            product_id: store::req_u32(&fields, 0, Self::TABLE)?,
            // A cart line without a quantity is not a cart line.
            quantity: store::req_u32(&fields, 1, Self::TABLE)?,
        })
    }

    fn to_line(&self) -> String {
        format!("{},{}", self.product_id, self.quantity)
    }
}
