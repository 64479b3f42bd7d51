//! Pricing Rate Use Cases

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entity::PricingRate;
use crate::domain::repository::PricingRateRepository;
use crate::domain::value_object::ShipmentType;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::PricingRateId;

#[derive(Debug, Clone)]
pub struct NewPricingRate {
    pub shipment_type: ShipmentType,
    pub rate_per_kg: Option<Decimal>,
    pub rate_per_cbm: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PricingRatePatch {
    pub rate_per_kg: Option<Decimal>,
    pub rate_per_cbm: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

/// A computed price for a prospective shipment
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub shipment_type: ShipmentType,
    pub cost: Decimal,
}

pub struct PricingService<R> {
    rates: Arc<R>,
}

impl<R> Clone for PricingService<R> {
    fn clone(&self) -> Self {
        Self {
            rates: Arc::clone(&self.rates),
        }
    }
}

impl<R: PricingRateRepository> PricingService<R> {
    pub fn new(rates: Arc<R>) -> Self {
        Self { rates }
    }

    pub async fn create(&self, input: NewPricingRate) -> LogisticsResult<PricingRate> {
        if input.rate_per_kg.is_none() && input.rate_per_cbm.is_none() {
            return Err(LogisticsError::Validation(
                "A rate per kg or per cbm is required".to_string(),
            ));
        }

        let mut rate = PricingRate::new(input.shipment_type);
        rate.rate_per_kg = input.rate_per_kg;
        rate.rate_per_cbm = input.rate_per_cbm;
        if let Some(exchange_rate) = input.exchange_rate {
            rate.exchange_rate = exchange_rate;
        }
        rate.notes = input.notes;

        self.rates.create(&rate).await?;
        Ok(rate)
    }

    pub async fn get(&self, rate_id: &PricingRateId) -> LogisticsResult<PricingRate> {
        self.rates
            .find_by_id(rate_id)
            .await?
            .ok_or(LogisticsError::NotFound("pricing rate"))
    }

    pub async fn list(&self) -> LogisticsResult<Vec<PricingRate>> {
        self.rates.list().await
    }

    pub async fn update(
        &self,
        rate_id: &PricingRateId,
        patch: PricingRatePatch,
    ) -> LogisticsResult<PricingRate> {
        let mut rate = self.get(rate_id).await?;

        if let Some(rate_per_kg) = patch.rate_per_kg {
            rate.rate_per_kg = Some(rate_per_kg);
        }
        if let Some(rate_per_cbm) = patch.rate_per_cbm {
            rate.rate_per_cbm = Some(rate_per_cbm);
        }
        if let Some(exchange_rate) = patch.exchange_rate {
            rate.exchange_rate = exchange_rate;
        }
        if let Some(is_active) = patch.is_active {
            rate.is_active = is_active;
        }
        if let Some(notes) = patch.notes {
            rate.notes = Some(notes);
        }
        rate.touch();

        self.rates.update(&rate).await?;
        Ok(rate)
    }

    pub async fn delete(&self, rate_id: &PricingRateId) -> LogisticsResult<()> {
        self.get(rate_id).await?;
        self.rates.delete(rate_id).await
    }

    /// Price a prospective shipment against the active rate card for its
    /// type. Weight pricing wins when both measurements are given.
    pub async fn quote(
        &self,
        shipment_type: ShipmentType,
        weight: Option<Decimal>,
        cbm: Option<Decimal>,
    ) -> LogisticsResult<Quote> {
        let rate = self
            .rates
            .find_active(shipment_type)
            .await?
            .ok_or(LogisticsError::NotFound("pricing rate"))?;

        let cost = rate.quote(weight, cbm).ok_or_else(|| {
            LogisticsError::Validation(
                "No applicable rate for the given measurements".to_string(),
            )
        })?;

        Ok(Quote {
            shipment_type,
            cost,
        })
    }
}
