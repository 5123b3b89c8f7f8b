use serde::Serialize;

use crate::error::{Result, ShopError};
use crate::store::{self, TableRecord};

/// Supported payment methods. Simulated only; there is no gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayMethod {
    #[serde(rename = "VISA")]
    Visa,
    Mastercard,
    JazzCash,
    EasyPaisa,
    PayPak,
}

impl PayMethod {
    /// Name as written to the payments table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::Mastercard => "Mastercard",
            Self::JazzCash => "JazzCash",
            Self::EasyPaisa => "EasyPaisa",
            Self::PayPak => "PayPak",
        }
    }

    /// Parse a method name, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "visa" => Some(Self::Visa),
            "mastercard" => Some(Self::Mastercard),
            "jazzcash" => Some(Self::JazzCash),
            "easypaisa" => Some(Self::EasyPaisa),
            "paypak" => Some(Self::PayPak),
            _ => None,
        }
    }
}

/// One row of the payments table.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: u32,
    pub order_id: u32,
    pub user_id: u32,
    /// Amount, stored to 2 decimal places.
    pub amount: f64,
    pub method: PayMethod,
    pub status: String,
}

impl TableRecord for Payment {
    const TABLE: &'static str = "payments";

    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        let method_raw = store::opt_str(&fields, 4);
        let method = PayMethod::parse(&method_raw).ok_or(ShopError::Parse {
            table: Self::TABLE,
            detail: format!("unknown payment method: {method_raw:?}"),
        })?;
        Ok(Self {
            id: store::req_u32(&fields, 0, Self::TABLE)?,
            order_id: store::req_u32(&fields, 1, Self::TABLE)?,
            user_id: store::req_u32(&fields, 2, Self::TABLE)?,
            amount: store::opt_f64(&fields, 3, Self::TABLE)?,
            method,
            status: store::opt_str(&fields, 5),
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{:.2},{},{}",
            self.id,
            self.order_id,
            self.user_id,
            self.amount,
            self.method.as_str(),
            self.status
        )
    }
}
