//! Simulated payment recording. There is no gateway behind this; a
//! payment row is the whole transaction.

use tracing::info;

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::payment::{PayMethod, Payment};
use crate::store::{self, next_id};

/// Record a payment against an order. The original flow always succeeds
/// once the inputs validate, so the stored status is `Completed`.
pub fn record_payment(
    config: &Config,
    order_id: u32,
    user_id: u32,
    amount: f64,
    method: PayMethod,
) -> Result<Payment> {
    if order_id == 0 || user_id == 0 {
        return Err(ShopError::Validation(
            "payment requires a valid order id and user id".to_string(),
        ));
    }
    if amount <= 0.0 {
        return Err(ShopError::Validation(format!(
            "payment amount must be positive (got {amount})"
        )));
    }

    let payment = Payment {
        id: next_id(&config.payments_path, config.settings.ids.payment_base),
        order_id,
        user_id,
        amount,
        method,
        status: "Completed".to_string(),
    };
    store::append_record(&config.payments_path, &payment)?;
    info!(
        payment_id = payment.id,
        order_id,
        method = method.as_str(),
        "payment recorded"
    );
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::scan_all;
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> Config {
        Config::new(tmp.path().join("data"))
    }

    #[test]
    fn records_with_base_id_and_completed_status() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let payment =
            record_payment(&config, 1001, 7, 59.97, PayMethod::Visa).unwrap();
        assert_eq!(payment.id, 5001);
        assert_eq!(payment.status, "Completed");

        let stored: Vec<Payment> = scan_all(&config.payments_path);
        assert_eq!(stored.len(), 1);
        assert!((stored[0].amount - 59.97).abs() < 1e-9);
    }

    #[test]
    fn ids_increase() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        record_payment(&config, 1001, 7, 10.0, PayMethod::Visa).unwrap();
        let second = record_payment(&config, 1002, 7, 20.0, PayMethod::PayPak).unwrap();
        assert_eq!(second.id, 5002);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        assert!(record_payment(&config, 0, 7, 10.0, PayMethod::Visa).is_err());
        assert!(record_payment(&config, 1001, 0, 10.0, PayMethod::Visa).is_err());
        assert!(record_payment(&config, 1001, 7, 0.0, PayMethod::Visa).is_err());
        assert!(record_payment(&config, 1001, 7, -5.0, PayMethod::Visa).is_err());
    }
}
