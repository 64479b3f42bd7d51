//! Repository Traits

use kernel::id::{BatchId, ClientId, InvoiceId, PaymentId, PricingRateId, ShipmentId};

use crate::domain::entity::{Batch, Client, Invoice, Payment, PricingRate, Shipment};
use crate::domain::value_object::ShipmentType;
use crate::error::LogisticsResult;

/// Client persistence
#[trait_variant::make(ClientRepository: Send)]
pub trait LocalClientRepository {
    async fn create(&self, client: &Client) -> LogisticsResult<()>;
    async fn find_by_id(&self, client_id: &ClientId) -> LogisticsResult<Option<Client>>;
    async fn list(&self) -> LogisticsResult<Vec<Client>>;
    async fn update(&self, client: &Client) -> LogisticsResult<()>;
    async fn delete(&self, client_id: &ClientId) -> LogisticsResult<()>;
}

/// Batch persistence, including batch-shipment membership
#[trait_variant::make(BatchRepository: Send)]
pub trait LocalBatchRepository {
    async fn create(&self, batch: &Batch) -> LogisticsResult<()>;
    async fn find_by_id(&self, batch_id: &BatchId) -> LogisticsResult<Option<Batch>>;
    async fn list(&self) -> LogisticsResult<Vec<Batch>>;
    async fn update(&self, batch: &Batch) -> LogisticsResult<()>;
    async fn delete(&self, batch_id: &BatchId) -> LogisticsResult<()>;

    /// Record a shipment's membership in a batch
    async fn add_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()>;
    async fn remove_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()>;
    async fn list_shipments(&self, batch_id: &BatchId) -> LogisticsResult<Vec<Shipment>>;
}

/// Shipment persistence
#[trait_variant::make(ShipmentRepository: Send)]
pub trait LocalShipmentRepository {
    async fn create(&self, shipment: &Shipment) -> LogisticsResult<()>;
    async fn find_by_id(&self, shipment_id: &ShipmentId) -> LogisticsResult<Option<Shipment>>;
    async fn find_by_tracking_number(&self, tracking: &str) -> LogisticsResult<Option<Shipment>>;
    async fn list(&self) -> LogisticsResult<Vec<Shipment>>;
    async fn list_for_client(&self, client_id: &ClientId) -> LogisticsResult<Vec<Shipment>>;
    async fn update(&self, shipment: &Shipment) -> LogisticsResult<()>;
    async fn delete(&self, shipment_id: &ShipmentId) -> LogisticsResult<()>;
}

/// Invoice persistence
#[trait_variant::make(InvoiceRepository: Send)]
pub trait LocalInvoiceRepository {
    async fn create(&self, invoice: &Invoice) -> LogisticsResult<()>;
    async fn find_by_id(&self, invoice_id: &InvoiceId) -> LogisticsResult<Option<Invoice>>;
    async fn list(&self) -> LogisticsResult<Vec<Invoice>>;
    async fn update(&self, invoice: &Invoice) -> LogisticsResult<()>;
    async fn delete(&self, invoice_id: &InvoiceId) -> LogisticsResult<()>;
}

/// Payment persistence, including payment-shipment allocation
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create(&self, payment: &Payment) -> LogisticsResult<()>;
    async fn find_by_id(&self, payment_id: &PaymentId) -> LogisticsResult<Option<Payment>>;
    async fn list(&self) -> LogisticsResult<Vec<Payment>>;
    async fn update(&self, payment: &Payment) -> LogisticsResult<()>;
    async fn delete(&self, payment_id: &PaymentId) -> LogisticsResult<()>;

    async fn link_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()>;
    async fn unlink_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()>;
    async fn list_shipments(&self, payment_id: &PaymentId) -> LogisticsResult<Vec<Shipment>>;
}

/// Pricing rate persistence
#[trait_variant::make(PricingRateRepository: Send)]
pub trait LocalPricingRateRepository {
    async fn create(&self, rate: &PricingRate) -> LogisticsResult<()>;
    async fn find_by_id(&self, rate_id: &PricingRateId) -> LogisticsResult<Option<PricingRate>>;
    /// The active rate card for a shipment type, if any
    async fn find_active(&self, shipment_type: ShipmentType)
        -> LogisticsResult<Option<PricingRate>>;
    async fn list(&self) -> LogisticsResult<Vec<PricingRate>>;
    async fn update(&self, rate: &PricingRate) -> LogisticsResult<()>;
    async fn delete(&self, rate_id: &PricingRateId) -> LogisticsResult<()>;
}

/// Everything the HTTP layer needs from storage, as one bound.
pub trait LogisticsRepository:
    ClientRepository
    + BatchRepository
    + ShipmentRepository
    + InvoiceRepository
    + PaymentRepository
    + PricingRateRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> LogisticsRepository for T where
    T: ClientRepository
        + BatchRepository
        + ShipmentRepository
        + InvoiceRepository
        + PaymentRepository
        + PricingRateRepository
        + Send
        + Sync
        + 'static
{
}
