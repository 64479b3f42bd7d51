//! Batch Management Use Cases

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::entity::{Batch, Shipment};
use crate::domain::repository::{BatchRepository, ShipmentRepository};
use crate::domain::value_object::ShipmentType;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::{BatchId, ShipmentId};

#[derive(Debug, Clone)]
pub struct NewBatch {
    pub batch_number: String,
    pub shipment_type: ShipmentType,
    pub container_size: String,
    pub capacity_limit: Option<Decimal>,
    pub estimated_departure: Option<NaiveDate>,
    pub estimated_arrival: Option<NaiveDate>,
    pub total_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchPatch {
    pub container_size: Option<String>,
    pub status: Option<String>,
    pub capacity_limit: Option<Decimal>,
    pub estimated_departure: Option<NaiveDate>,
    pub estimated_arrival: Option<NaiveDate>,
    pub total_cost: Option<Decimal>,
}

pub struct BatchService<B, S> {
    batches: Arc<B>,
    shipments: Arc<S>,
}

impl<B, S> Clone for BatchService<B, S> {
    fn clone(&self) -> Self {
        Self {
            batches: Arc::clone(&self.batches),
            shipments: Arc::clone(&self.shipments),
        }
    }
}

impl<B: BatchRepository, S: ShipmentRepository> BatchService<B, S> {
    pub fn new(batches: Arc<B>, shipments: Arc<S>) -> Self {
        Self { batches, shipments }
    }

    pub async fn create(&self, input: NewBatch) -> LogisticsResult<Batch> {
        if input.batch_number.trim().is_empty() {
            return Err(LogisticsError::Validation(
                "Batch number is required".to_string(),
            ));
        }

        let mut batch = Batch::new(
            input.batch_number.trim().to_string(),
            input.shipment_type,
            input.container_size,
        );
        if let Some(capacity) = input.capacity_limit {
            batch.capacity_limit = capacity;
        }
        batch.estimated_departure = input.estimated_departure;
        batch.estimated_arrival = input.estimated_arrival;
        if let Some(cost) = input.total_cost {
            batch.total_cost = cost;
        }

        self.batches.create(&batch).await?;
        Ok(batch)
    }

    pub async fn get(&self, batch_id: &BatchId) -> LogisticsResult<Batch> {
        self.batches
            .find_by_id(batch_id)
            .await?
            .ok_or(LogisticsError::NotFound("batch"))
    }

    pub async fn list(&self) -> LogisticsResult<Vec<Batch>> {
        self.batches.list().await
    }

    pub async fn update(&self, batch_id: &BatchId, patch: BatchPatch) -> LogisticsResult<Batch> {
        let mut batch = self.get(batch_id).await?;

        if let Some(container_size) = patch.container_size {
            batch.container_size = container_size;
        }
        if let Some(status) = patch.status {
            batch.status = status;
        }
        if let Some(capacity) = patch.capacity_limit {
            batch.capacity_limit = capacity;
        }
        if let Some(departure) = patch.estimated_departure {
            batch.estimated_departure = Some(departure);
        }
        if let Some(arrival) = patch.estimated_arrival {
            batch.estimated_arrival = Some(arrival);
        }
        if let Some(cost) = patch.total_cost {
            batch.total_cost = cost;
        }
        batch.touch();

        self.batches.update(&batch).await?;
        Ok(batch)
    }

    pub async fn delete(&self, batch_id: &BatchId) -> LogisticsResult<()> {
        self.get(batch_id).await?;
        self.batches.delete(batch_id).await
    }

    /// Place a shipment into a batch: records the membership, stamps the
    /// shipment with the batch id, and folds its totals into the batch.
    pub async fn add_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<Batch> {
        let mut batch = self.get(batch_id).await?;
        let mut shipment = self
            .shipments
            .find_by_id(shipment_id)
            .await?
            .ok_or(LogisticsError::NotFound("shipment"))?;

        if shipment.batch_id.is_some() {
            return Err(LogisticsError::Conflict(
                "Shipment is already assigned to a batch".to_string(),
            ));
        }

        self.batches.add_shipment(batch_id, shipment_id).await?;

        shipment.assign_to_batch(*batch_id);
        self.shipments.update(&shipment).await?;

        batch.absorb_shipment(
            shipment.packages,
            shipment.weight.unwrap_or_default(),
            shipment.cbm.unwrap_or_default(),
        );
        self.batches.update(&batch).await?;

        Ok(batch)
    }

    pub async fn remove_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<Batch> {
        let mut batch = self.get(batch_id).await?;
        let mut shipment = self
            .shipments
            .find_by_id(shipment_id)
            .await?
            .ok_or(LogisticsError::NotFound("shipment"))?;

        if shipment.batch_id.as_ref() != Some(batch_id) {
            return Err(LogisticsError::Validation(
                "Shipment is not in this batch".to_string(),
            ));
        }

        self.batches.remove_shipment(batch_id, shipment_id).await?;

        shipment.remove_from_batch();
        self.shipments.update(&shipment).await?;

        batch.release_shipment(
            shipment.packages,
            shipment.weight.unwrap_or_default(),
            shipment.cbm.unwrap_or_default(),
        );
        self.batches.update(&batch).await?;

        Ok(batch)
    }

    pub async fn list_shipments(&self, batch_id: &BatchId) -> LogisticsResult<Vec<Shipment>> {
        self.get(batch_id).await?;
        self.batches.list_shipments(batch_id).await
    }
}
