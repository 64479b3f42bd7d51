//! Value Objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shipment transport mode. Batches and pricing rates carry the same
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentType {
    Air,
    Sea,
}

impl ShipmentType {
    pub fn code(&self) -> &'static str {
        match self {
            ShipmentType::Air => "air",
            ShipmentType::Sea => "sea",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "air" => Some(ShipmentType::Air),
            "sea" => Some(ShipmentType::Sea),
            _ => None,
        }
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Default status for new shipments and batches
pub const STATUS_AT_CHINA_WAREHOUSE: &str = "At China Warehouse";
/// Default status for new invoices
pub const INVOICE_STATUS_PENDING: &str = "Pending";
/// Default status for recorded payments
pub const PAYMENT_STATUS_COMPLETED: &str = "Completed";
/// Default currency for invoices and payments
pub const DEFAULT_CURRENCY: &str = "USD";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_type_codes() {
        assert_eq!(ShipmentType::Air.code(), "air");
        assert_eq!(ShipmentType::Sea.code(), "sea");
        assert_eq!(ShipmentType::from_code("air"), Some(ShipmentType::Air));
        assert_eq!(ShipmentType::from_code("truck"), None);
    }
}
