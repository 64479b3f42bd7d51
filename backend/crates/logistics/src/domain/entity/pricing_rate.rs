//! Pricing Rate Entity

use chrono::{DateTime, Utc};
use kernel::id::PricingRateId;
use rust_decimal::Decimal;

use crate::domain::value_object::ShipmentType;

/// Rate card for one shipment type. Air freight quotes by weight, sea
/// freight by volume; whichever rate is present wins, weight first.
#[derive(Debug, Clone)]
pub struct PricingRate {
    pub pricing_rate_id: PricingRateId,
    pub shipment_type: ShipmentType,
    pub rate_per_kg: Option<Decimal>,
    pub rate_per_cbm: Option<Decimal>,
    pub exchange_rate: Decimal,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingRate {
    pub fn new(shipment_type: ShipmentType) -> Self {
        let now = Utc::now();
        Self {
            pricing_rate_id: PricingRateId::new(),
            shipment_type,
            rate_per_kg: None,
            rate_per_cbm: None,
            exchange_rate: Decimal::ONE,
            is_active: true,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Quote a shipment against this rate card. Weight-based pricing
    /// takes precedence when both a weight and a per-kg rate exist.
    pub fn quote(&self, weight: Option<Decimal>, cbm: Option<Decimal>) -> Option<Decimal> {
        if let (Some(weight), Some(rate)) = (weight, self.rate_per_kg) {
            return Some(weight * rate * self.exchange_rate);
        }
        if let (Some(cbm), Some(rate)) = (cbm, self.rate_per_cbm) {
            return Some(cbm * rate * self.exchange_rate);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weight_quote() {
        let mut rate = PricingRate::new(ShipmentType::Air);
        rate.rate_per_kg = Some(dec!(12.50));

        assert_eq!(rate.quote(Some(dec!(10)), None), Some(dec!(125.00)));
    }

    #[test]
    fn test_volume_quote() {
        let mut rate = PricingRate::new(ShipmentType::Sea);
        rate.rate_per_cbm = Some(dec!(280.00));

        assert_eq!(rate.quote(None, Some(dec!(2.5))), Some(dec!(700.000)));
    }

    #[test]
    fn test_weight_takes_precedence() {
        let mut rate = PricingRate::new(ShipmentType::Air);
        rate.rate_per_kg = Some(dec!(10));
        rate.rate_per_cbm = Some(dec!(100));

        assert_eq!(
            rate.quote(Some(dec!(3)), Some(dec!(3))),
            Some(dec!(30))
        );
    }

    #[test]
    fn test_exchange_rate_applies() {
        let mut rate = PricingRate::new(ShipmentType::Air);
        rate.rate_per_kg = Some(dec!(10));
        rate.exchange_rate = dec!(1.5);

        assert_eq!(rate.quote(Some(dec!(4)), None), Some(dec!(60.0)));
    }

    #[test]
    fn test_no_applicable_rate() {
        let rate = PricingRate::new(ShipmentType::Sea);
        assert_eq!(rate.quote(Some(dec!(10)), Some(dec!(5))), None);
    }
}
