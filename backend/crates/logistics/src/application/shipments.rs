//! Shipment Management Use Cases

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::entity::Shipment;
use crate::domain::repository::{ClientRepository, ShipmentRepository};
use crate::domain::value_object::ShipmentType;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::{ClientId, ShipmentId};

#[derive(Debug, Clone)]
pub struct NewShipment {
    pub tracking_number: String,
    pub shipment_type: ShipmentType,
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub item_number: Option<String>,
    pub packages: i32,
    pub weight: Option<Decimal>,
    pub cbm: Option<Decimal>,
    pub cost: Decimal,
    pub eta: Option<NaiveDate>,
    pub etd: Option<NaiveDate>,
    pub notes: Option<String>,
    pub send_notification: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ShipmentPatch {
    pub status: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub item_number: Option<String>,
    pub packages: Option<i32>,
    pub weight: Option<Decimal>,
    pub cbm: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub eta: Option<NaiveDate>,
    pub etd: Option<NaiveDate>,
    pub notes: Option<String>,
    pub send_notification: Option<bool>,
}

pub struct ShipmentService<S, C> {
    shipments: Arc<S>,
    clients: Arc<C>,
}

impl<S, C> Clone for ShipmentService<S, C> {
    fn clone(&self) -> Self {
        Self {
            shipments: Arc::clone(&self.shipments),
            clients: Arc::clone(&self.clients),
        }
    }
}

impl<S: ShipmentRepository, C: ClientRepository> ShipmentService<S, C> {
    pub fn new(shipments: Arc<S>, clients: Arc<C>) -> Self {
        Self { shipments, clients }
    }

    /// Register a shipment. When it belongs to a known client the
    /// client's shipment count and lifetime spend are rolled forward.
    pub async fn create(&self, input: NewShipment) -> LogisticsResult<Shipment> {
        let tracking = input.tracking_number.trim();
        if tracking.is_empty() {
            return Err(LogisticsError::Validation(
                "Tracking number is required".to_string(),
            ));
        }
        if self.shipments.find_by_tracking_number(tracking).await?.is_some() {
            return Err(LogisticsError::Conflict(
                "Tracking number already in use".to_string(),
            ));
        }

        let mut shipment = Shipment::new(
            tracking.to_string(),
            input.shipment_type,
            input.client_name,
        );
        shipment.client_id = input.client_id;
        shipment.client_phone = input.client_phone;
        shipment.client_email = input.client_email;
        shipment.item_number = input.item_number;
        shipment.packages = input.packages;
        shipment.weight = input.weight;
        shipment.cbm = input.cbm;
        shipment.cost = input.cost;
        shipment.eta = input.eta;
        shipment.etd = input.etd;
        shipment.notes = input.notes;
        if let Some(notify) = input.send_notification {
            shipment.send_notification = notify;
        }

        if let Some(client_id) = &input.client_id {
            let mut client = self
                .clients
                .find_by_id(client_id)
                .await?
                .ok_or(LogisticsError::NotFound("client"))?;
            client.record_shipment(shipment.cost);
            self.clients.update(&client).await?;
        }

        self.shipments.create(&shipment).await?;
        Ok(shipment)
    }

    pub async fn get(&self, shipment_id: &ShipmentId) -> LogisticsResult<Shipment> {
        self.shipments
            .find_by_id(shipment_id)
            .await?
            .ok_or(LogisticsError::NotFound("shipment"))
    }

    pub async fn get_by_tracking(&self, tracking: &str) -> LogisticsResult<Shipment> {
        self.shipments
            .find_by_tracking_number(tracking.trim())
            .await?
            .ok_or(LogisticsError::NotFound("shipment"))
    }

    pub async fn list(&self) -> LogisticsResult<Vec<Shipment>> {
        self.shipments.list().await
    }

    pub async fn list_for_client(&self, client_id: &ClientId) -> LogisticsResult<Vec<Shipment>> {
        self.shipments.list_for_client(client_id).await
    }

    pub async fn update(
        &self,
        shipment_id: &ShipmentId,
        patch: ShipmentPatch,
    ) -> LogisticsResult<Shipment> {
        let mut shipment = self.get(shipment_id).await?;

        if let Some(status) = patch.status {
            shipment.status = status;
        }
        if let Some(phone) = patch.client_phone {
            shipment.client_phone = Some(phone);
        }
        if let Some(email) = patch.client_email {
            shipment.client_email = Some(email);
        }
        if let Some(item_number) = patch.item_number {
            shipment.item_number = Some(item_number);
        }
        if let Some(packages) = patch.packages {
            shipment.packages = packages;
        }
        if let Some(weight) = patch.weight {
            shipment.weight = Some(weight);
        }
        if let Some(cbm) = patch.cbm {
            shipment.cbm = Some(cbm);
        }
        if let Some(cost) = patch.cost {
            shipment.cost = cost;
        }
        if let Some(eta) = patch.eta {
            shipment.eta = Some(eta);
        }
        if let Some(etd) = patch.etd {
            shipment.etd = Some(etd);
        }
        if let Some(notes) = patch.notes {
            shipment.notes = Some(notes);
        }
        if let Some(notify) = patch.send_notification {
            shipment.send_notification = notify;
        }
        shipment.touch();

        self.shipments.update(&shipment).await?;
        Ok(shipment)
    }

    pub async fn delete(&self, shipment_id: &ShipmentId) -> LogisticsResult<()> {
        self.get(shipment_id).await?;
        self.shipments.delete(shipment_id).await
    }
}
