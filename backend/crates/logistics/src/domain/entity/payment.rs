//! Payment Entity

use chrono::{DateTime, Utc};
use kernel::id::{ClientId, PaymentId};
use rust_decimal::Decimal;

use crate::domain::value_object::{DEFAULT_CURRENCY, PAYMENT_STATUS_COMPLETED};

/// A received payment. `reference_number` is the unique human-facing
/// identifier; `transaction_id` comes from the payment provider.
#[derive(Debug, Clone)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_mode: String,
    pub transaction_id: String,
    pub status: String,
    pub invoice_number: Option<String>,
    pub receipt_number: Option<String>,
    pub reference_number: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        client_name: String,
        amount: Decimal,
        payment_mode: String,
        transaction_id: String,
        reference_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            payment_id: PaymentId::new(),
            client_id: None,
            client_name,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_mode,
            transaction_id,
            status: PAYMENT_STATUS_COMPLETED.to_string(),
            invoice_number: None,
            receipt_number: None,
            reference_number,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_payment_defaults() {
        let payment = Payment::new(
            "Acme Imports".to_string(),
            dec!(350.00),
            "bank transfer".to_string(),
            "TXN-889".to_string(),
            "PAY-2024-0001".to_string(),
        );
        assert_eq!(payment.currency, DEFAULT_CURRENCY);
        assert_eq!(payment.status, PAYMENT_STATUS_COMPLETED);
    }
}
