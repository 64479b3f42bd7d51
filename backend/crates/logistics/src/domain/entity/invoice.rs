//! Invoice Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ClientId, InvoiceId};
use rust_decimal::Decimal;

use crate::domain::value_object::{DEFAULT_CURRENCY, INVOICE_STATUS_PENDING};

/// A bill issued to a client. Line items are stored as a JSON document,
/// mirroring how the dashboard edits them.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub invoice_id: InvoiceId,
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub due_date: NaiveDate,
    pub items: serde_json::Value,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(client_name: String, amount: Decimal, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            invoice_id: InvoiceId::new(),
            client_id: None,
            client_name,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            status: INVOICE_STATUS_PENDING.to_string(),
            due_date,
            items: serde_json::Value::Array(Vec::new()),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_invoice_defaults() {
        let invoice = Invoice::new(
            "Acme Imports".to_string(),
            dec!(1500.00),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        assert_eq!(invoice.currency, DEFAULT_CURRENCY);
        assert_eq!(invoice.status, INVOICE_STATUS_PENDING);
        assert_eq!(invoice.items, serde_json::json!([]));
    }
}
