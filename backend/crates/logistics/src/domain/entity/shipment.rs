//! Shipment Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{BatchId, ClientId, ShipmentId};
use rust_decimal::Decimal;

use crate::domain::value_object::{STATUS_AT_CHINA_WAREHOUSE, ShipmentType};

/// One tracked consignment. The client's name, phone, and email are
/// denormalized onto the row so listings don't need a join.
#[derive(Debug, Clone)]
pub struct Shipment {
    pub shipment_id: ShipmentId,
    pub client_id: Option<ClientId>,
    /// Human-facing identifier, unique
    pub tracking_number: String,
    pub shipment_type: ShipmentType,
    pub status: String,
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
    pub send_notification: bool,
    pub batch_id: Option<BatchId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    pub fn new(tracking_number: String, shipment_type: ShipmentType, client_name: String) -> Self {
        let now = Utc::now();
        Self {
            shipment_id: ShipmentId::new(),
            client_id: None,
            tracking_number,
            shipment_type,
            status: STATUS_AT_CHINA_WAREHOUSE.to_string(),
            client_name,
            client_phone: None,
            client_email: None,
            item_number: None,
            packages: 0,
            weight: None,
            cbm: None,
            cost: Decimal::ZERO,
            eta: None,
            etd: None,
            notes: None,
            send_notification: true,
            batch_id: None,
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

    pub fn assign_to_batch(&mut self, batch_id: BatchId) {
        self.batch_id = Some(batch_id);
        self.touch();
    }

    pub fn remove_from_batch(&mut self) {
        self.batch_id = None;
        self.touch();
    }
}
