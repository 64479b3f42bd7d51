//! Client Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::ClientId;
use rust_decimal::Decimal;

/// A customer the business ships for
#[derive(Debug, Clone)]
pub struct Client {
    pub client_id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Denormalized counter, maintained as shipments are recorded
    pub total_shipments: i32,
    pub total_spent: Decimal,
    pub join_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            client_id: ClientId::new(),
            name,
            email: None,
            phone: None,
            address: None,
            total_shipments: 0,
            total_spent: Decimal::ZERO,
            join_date: Some(now.date_naive()),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn record_shipment(&mut self, cost: Decimal) {
        self.total_shipments += 1;
        self.total_spent += cost;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_shipment_updates_totals() {
        let mut client = Client::new("Acme Imports".to_string());
        let before = client.updated_at;

        client.record_shipment(dec!(120.50));
        client.record_shipment(dec!(79.50));

        assert_eq!(client.total_shipments, 2);
        assert_eq!(client.total_spent, dec!(200.00));
        assert!(client.updated_at >= before);
    }
}
