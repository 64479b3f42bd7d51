//! Junction Rows
//!
//! Many-to-many membership rows. Thin by design: they carry their own id
//! and creation time and nothing else.

use chrono::{DateTime, Utc};
use kernel::id::{BatchId, PaymentId, ShipmentId};
use uuid::Uuid;

/// Membership of a shipment in a batch
#[derive(Debug, Clone)]
pub struct BatchShipment {
    pub id: Uuid,
    pub batch_id: BatchId,
    pub shipment_id: ShipmentId,
    pub created_at: DateTime<Utc>,
}

impl BatchShipment {
    pub fn new(batch_id: BatchId, shipment_id: ShipmentId) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch_id,
            shipment_id,
            created_at: Utc::now(),
        }
    }
}

/// Allocation of a payment against a shipment
#[derive(Debug, Clone)]
pub struct PaymentShipment {
    pub id: Uuid,
    pub payment_id: PaymentId,
    pub shipment_id: ShipmentId,
    pub created_at: DateTime<Utc>,
}

impl PaymentShipment {
    pub fn new(payment_id: PaymentId, shipment_id: ShipmentId) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_id,
            shipment_id,
            created_at: Utc::now(),
        }
    }
}
