//! Batch Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::BatchId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::value_object::{STATUS_AT_CHINA_WAREHOUSE, ShipmentType};

/// A container-load of shipments moving together
#[derive(Debug, Clone)]
pub struct Batch {
    pub batch_id: BatchId,
    /// Human-facing identifier, unique
    pub batch_number: String,
    pub shipment_type: ShipmentType,
    pub container_size: String,
    pub status: String,
    pub total_packages: i32,
    pub total_weight: Decimal,
    pub total_cbm: Decimal,
    pub utilization_percentage: i32,
    pub capacity_limit: Decimal,
    pub estimated_departure: Option<NaiveDate>,
    pub estimated_arrival: Option<NaiveDate>,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(batch_number: String, shipment_type: ShipmentType, container_size: String) -> Self {
        let now = Utc::now();
        Self {
            batch_id: BatchId::new(),
            batch_number,
            shipment_type,
            container_size,
            status: STATUS_AT_CHINA_WAREHOUSE.to_string(),
            total_packages: 0,
            total_weight: Decimal::ZERO,
            total_cbm: Decimal::ZERO,
            utilization_percentage: 0,
            capacity_limit: Decimal::ZERO,
            estimated_departure: None,
            estimated_arrival: None,
            total_cost: Decimal::ZERO,
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

    /// Fold one shipment's totals into the batch and recompute
    /// utilization against the capacity limit.
    pub fn absorb_shipment(&mut self, packages: i32, weight: Decimal, cbm: Decimal) {
        self.total_packages += packages;
        self.total_weight += weight;
        self.total_cbm += cbm;
        self.recompute_utilization();
        self.touch();
    }

    /// Back a shipment's totals out of the batch, clamping at zero.
    pub fn release_shipment(&mut self, packages: i32, weight: Decimal, cbm: Decimal) {
        self.total_packages = (self.total_packages - packages).max(0);
        self.total_weight = (self.total_weight - weight).max(Decimal::ZERO);
        self.total_cbm = (self.total_cbm - cbm).max(Decimal::ZERO);
        self.recompute_utilization();
        self.touch();
    }

    fn recompute_utilization(&mut self) {
        if self.capacity_limit.is_zero() {
            self.utilization_percentage = 0;
            return;
        }
        let pct = (self.total_cbm / self.capacity_limit) * Decimal::from(100);
        self.utilization_percentage = pct.trunc().to_i32().unwrap_or(i32::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn batch() -> Batch {
        Batch::new(
            "BATCH-2024-001".to_string(),
            ShipmentType::Sea,
            "40ft".to_string(),
        )
    }

    #[test]
    fn test_new_batch_defaults() {
        let b = batch();
        assert_eq!(b.status, STATUS_AT_CHINA_WAREHOUSE);
        assert_eq!(b.total_packages, 0);
        assert_eq!(b.utilization_percentage, 0);
    }

    #[test]
    fn test_absorb_shipment_updates_utilization() {
        let mut b = batch();
        b.capacity_limit = dec!(60.00);

        b.absorb_shipment(3, dec!(120.0), dec!(15.0));
        assert_eq!(b.total_packages, 3);
        assert_eq!(b.total_cbm, dec!(15.0));
        assert_eq!(b.utilization_percentage, 25);
    }

    #[test]
    fn test_release_shipment_clamps_at_zero() {
        let mut b = batch();
        b.capacity_limit = dec!(60.00);
        b.absorb_shipment(2, dec!(50.0), dec!(6.0));

        b.release_shipment(5, dec!(80.0), dec!(10.0));
        assert_eq!(b.total_packages, 0);
        assert_eq!(b.total_weight, dec!(0.0));
        assert_eq!(b.utilization_percentage, 0);
    }

    #[test]
    fn test_zero_capacity_keeps_utilization_zero() {
        let mut b = batch();
        b.absorb_shipment(1, dec!(10.0), dec!(5.0));
        assert_eq!(b.utilization_percentage, 0);
    }
}
