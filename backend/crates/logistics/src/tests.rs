//! Service tests over an in-memory repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::application::{
    BatchService, ClientService, InvoiceService, NewBatch, NewClient, NewInvoice, NewShipment,
    PricingRatePatch, PricingService, ShipmentService,
};
use crate::domain::entity::{Batch, Client, Invoice, Payment, PricingRate, Shipment};
use crate::domain::repository::{
    BatchRepository, ClientRepository, InvoiceRepository, PaymentRepository,
    PricingRateRepository, ShipmentRepository,
};
use crate::domain::value_object::ShipmentType;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::{BatchId, ClientId, InvoiceId, PaymentId, PricingRateId, ShipmentId};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct Inner {
    clients: HashMap<ClientId, Client>,
    batches: HashMap<BatchId, Batch>,
    shipments: HashMap<ShipmentId, Shipment>,
    invoices: HashMap<InvoiceId, Invoice>,
    payments: HashMap<PaymentId, Payment>,
    rates: HashMap<PricingRateId, PricingRate>,
    batch_links: Vec<(BatchId, ShipmentId)>,
    payment_links: Vec<(PaymentId, ShipmentId)>,
}

#[derive(Clone, Default)]
struct MemRepo(Arc<Mutex<Inner>>);

impl MemRepo {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.0.lock().unwrap()
    }
}

impl ClientRepository for MemRepo {
    async fn create(&self, client: &Client) -> LogisticsResult<()> {
        self.lock().clients.insert(client.client_id, client.clone());
        Ok(())
    }

    async fn find_by_id(&self, client_id: &ClientId) -> LogisticsResult<Option<Client>> {
        Ok(self.lock().clients.get(client_id).cloned())
    }

    async fn list(&self) -> LogisticsResult<Vec<Client>> {
        Ok(self.lock().clients.values().cloned().collect())
    }

    async fn update(&self, client: &Client) -> LogisticsResult<()> {
        self.lock().clients.insert(client.client_id, client.clone());
        Ok(())
    }

    async fn delete(&self, client_id: &ClientId) -> LogisticsResult<()> {
        self.lock().clients.remove(client_id);
        Ok(())
    }
}

impl BatchRepository for MemRepo {
    async fn create(&self, batch: &Batch) -> LogisticsResult<()> {
        self.lock().batches.insert(batch.batch_id, batch.clone());
        Ok(())
    }

    async fn find_by_id(&self, batch_id: &BatchId) -> LogisticsResult<Option<Batch>> {
        Ok(self.lock().batches.get(batch_id).cloned())
    }

    async fn list(&self) -> LogisticsResult<Vec<Batch>> {
        Ok(self.lock().batches.values().cloned().collect())
    }

    async fn update(&self, batch: &Batch) -> LogisticsResult<()> {
        self.lock().batches.insert(batch.batch_id, batch.clone());
        Ok(())
    }

    async fn delete(&self, batch_id: &BatchId) -> LogisticsResult<()> {
        let mut inner = self.lock();
        inner.batches.remove(batch_id);
        inner.batch_links.retain(|(b, _)| b != batch_id);
        Ok(())
    }

    async fn add_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        self.lock().batch_links.push((*batch_id, *shipment_id));
        Ok(())
    }

    async fn remove_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        self.lock()
            .batch_links
            .retain(|(b, s)| !(b == batch_id && s == shipment_id));
        Ok(())
    }

    async fn list_shipments(&self, batch_id: &BatchId) -> LogisticsResult<Vec<Shipment>> {
        let inner = self.lock();
        Ok(inner
            .batch_links
            .iter()
            .filter(|(b, _)| b == batch_id)
            .filter_map(|(_, s)| inner.shipments.get(s).cloned())
            .collect())
    }
}

impl ShipmentRepository for MemRepo {
    async fn create(&self, shipment: &Shipment) -> LogisticsResult<()> {
        self.lock()
            .shipments
            .insert(shipment.shipment_id, shipment.clone());
        Ok(())
    }

    async fn find_by_id(&self, shipment_id: &ShipmentId) -> LogisticsResult<Option<Shipment>> {
        Ok(self.lock().shipments.get(shipment_id).cloned())
    }

    async fn find_by_tracking_number(&self, tracking: &str) -> LogisticsResult<Option<Shipment>> {
        Ok(self
            .lock()
            .shipments
            .values()
            .find(|s| s.tracking_number == tracking)
            .cloned())
    }

    async fn list(&self) -> LogisticsResult<Vec<Shipment>> {
        Ok(self.lock().shipments.values().cloned().collect())
    }

    async fn list_for_client(&self, client_id: &ClientId) -> LogisticsResult<Vec<Shipment>> {
        Ok(self
            .lock()
            .shipments
            .values()
            .filter(|s| s.client_id.as_ref() == Some(client_id))
            .cloned()
            .collect())
    }

    async fn update(&self, shipment: &Shipment) -> LogisticsResult<()> {
        self.lock()
            .shipments
            .insert(shipment.shipment_id, shipment.clone());
        Ok(())
    }

    async fn delete(&self, shipment_id: &ShipmentId) -> LogisticsResult<()> {
        let mut inner = self.lock();
        inner.shipments.remove(shipment_id);
        inner.batch_links.retain(|(_, s)| s != shipment_id);
        inner.payment_links.retain(|(_, s)| s != shipment_id);
        Ok(())
    }
}

impl InvoiceRepository for MemRepo {
    async fn create(&self, invoice: &Invoice) -> LogisticsResult<()> {
        self.lock()
            .invoices
            .insert(invoice.invoice_id, invoice.clone());
        Ok(())
    }

    async fn find_by_id(&self, invoice_id: &InvoiceId) -> LogisticsResult<Option<Invoice>> {
        Ok(self.lock().invoices.get(invoice_id).cloned())
    }

    async fn list(&self) -> LogisticsResult<Vec<Invoice>> {
        Ok(self.lock().invoices.values().cloned().collect())
    }

    async fn update(&self, invoice: &Invoice) -> LogisticsResult<()> {
        self.lock()
            .invoices
            .insert(invoice.invoice_id, invoice.clone());
        Ok(())
    }

    async fn delete(&self, invoice_id: &InvoiceId) -> LogisticsResult<()> {
        self.lock().invoices.remove(invoice_id);
        Ok(())
    }
}

impl PaymentRepository for MemRepo {
    async fn create(&self, payment: &Payment) -> LogisticsResult<()> {
        self.lock()
            .payments
            .insert(payment.payment_id, payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, payment_id: &PaymentId) -> LogisticsResult<Option<Payment>> {
        Ok(self.lock().payments.get(payment_id).cloned())
    }

    async fn list(&self) -> LogisticsResult<Vec<Payment>> {
        Ok(self.lock().payments.values().cloned().collect())
    }

    async fn update(&self, payment: &Payment) -> LogisticsResult<()> {
        self.lock()
            .payments
            .insert(payment.payment_id, payment.clone());
        Ok(())
    }

    async fn delete(&self, payment_id: &PaymentId) -> LogisticsResult<()> {
        let mut inner = self.lock();
        inner.payments.remove(payment_id);
        inner.payment_links.retain(|(p, _)| p != payment_id);
        Ok(())
    }

    async fn link_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        self.lock().payment_links.push((*payment_id, *shipment_id));
        Ok(())
    }

    async fn unlink_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        self.lock()
            .payment_links
            .retain(|(p, s)| !(p == payment_id && s == shipment_id));
        Ok(())
    }

    async fn list_shipments(&self, payment_id: &PaymentId) -> LogisticsResult<Vec<Shipment>> {
        let inner = self.lock();
        Ok(inner
            .payment_links
            .iter()
            .filter(|(p, _)| p == payment_id)
            .filter_map(|(_, s)| inner.shipments.get(s).cloned())
            .collect())
    }
}

impl PricingRateRepository for MemRepo {
    async fn create(&self, rate: &PricingRate) -> LogisticsResult<()> {
        self.lock().rates.insert(rate.pricing_rate_id, rate.clone());
        Ok(())
    }

    async fn find_by_id(&self, rate_id: &PricingRateId) -> LogisticsResult<Option<PricingRate>> {
        Ok(self.lock().rates.get(rate_id).cloned())
    }

    async fn find_active(
        &self,
        shipment_type: ShipmentType,
    ) -> LogisticsResult<Option<PricingRate>> {
        Ok(self
            .lock()
            .rates
            .values()
            .filter(|r| r.shipment_type == shipment_type && r.is_active)
            .max_by_key(|r| r.updated_at)
            .cloned())
    }

    async fn list(&self) -> LogisticsResult<Vec<PricingRate>> {
        Ok(self.lock().rates.values().cloned().collect())
    }

    async fn update(&self, rate: &PricingRate) -> LogisticsResult<()> {
        self.lock().rates.insert(rate.pricing_rate_id, rate.clone());
        Ok(())
    }

    async fn delete(&self, rate_id: &PricingRateId) -> LogisticsResult<()> {
        self.lock().rates.remove(rate_id);
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn repo() -> Arc<MemRepo> {
    Arc::new(MemRepo::default())
}

fn new_shipment(tracking: &str) -> NewShipment {
    NewShipment {
        tracking_number: tracking.to_string(),
        shipment_type: ShipmentType::Sea,
        client_id: None,
        client_name: "Ama Mensah".to_string(),
        client_phone: None,
        client_email: None,
        item_number: None,
        packages: 2,
        weight: Some(dec!(40.0)),
        cbm: Some(dec!(3.0)),
        cost: dec!(150.00),
        eta: None,
        etd: None,
        notes: None,
        send_notification: None,
    }
}

fn shipment_service(repo: &Arc<MemRepo>) -> ShipmentService<MemRepo, MemRepo> {
    ShipmentService::new(Arc::clone(repo), Arc::clone(repo))
}

fn batch_service(repo: &Arc<MemRepo>) -> BatchService<MemRepo, MemRepo> {
    BatchService::new(Arc::clone(repo), Arc::clone(repo))
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_duplicate_tracking_number_rejected() {
    let repo = repo();
    let shipments = shipment_service(&repo);

    shipments.create(new_shipment("GHA-001")).await.unwrap();
    let err = shipments.create(new_shipment("GHA-001")).await.unwrap_err();
    assert!(matches!(err, LogisticsError::Conflict(_)));
}

#[tokio::test]
async fn test_shipment_rolls_client_totals_forward() {
    let repo = repo();
    let clients = ClientService::new(Arc::clone(&repo));
    let shipments = shipment_service(&repo);

    let client = clients
        .create(NewClient {
            name: "Ama Mensah".to_string(),
            ..NewClient::default()
        })
        .await
        .unwrap();

    let mut input = new_shipment("GHA-002");
    input.client_id = Some(client.client_id);
    shipments.create(input).await.unwrap();

    let client = clients.get(&client.client_id).await.unwrap();
    assert_eq!(client.total_shipments, 1);
    assert_eq!(client.total_spent, dec!(150.00));

    let history = shipments.list_for_client(&client.client_id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_unknown_client_on_shipment_is_not_found() {
    let repo = repo();
    let shipments = shipment_service(&repo);

    let mut input = new_shipment("GHA-003");
    input.client_id = Some(ClientId::new());
    let err = shipments.create(input).await.unwrap_err();
    assert!(matches!(err, LogisticsError::NotFound("client")));
}

#[tokio::test]
async fn test_batch_membership_updates_totals() {
    let repo = repo();
    let shipments = shipment_service(&repo);
    let batches = batch_service(&repo);

    let batch = batches
        .create(NewBatch {
            batch_number: "SEA-2024-01".to_string(),
            shipment_type: ShipmentType::Sea,
            container_size: "40ft".to_string(),
            capacity_limit: Some(dec!(60.0)),
            estimated_departure: None,
            estimated_arrival: None,
            total_cost: None,
        })
        .await
        .unwrap();
    let shipment = shipments.create(new_shipment("GHA-004")).await.unwrap();

    let batch = batches
        .add_shipment(&batch.batch_id, &shipment.shipment_id)
        .await
        .unwrap();
    assert_eq!(batch.total_packages, 2);
    assert_eq!(batch.total_cbm, dec!(3.0));
    assert_eq!(batch.utilization_percentage, 5);

    let shipment = shipments.get(&shipment.shipment_id).await.unwrap();
    assert_eq!(shipment.batch_id, Some(batch.batch_id));

    let members = batches.list_shipments(&batch.batch_id).await.unwrap();
    assert_eq!(members.len(), 1);

    // a shipment can only sit in one batch at a time
    let err = batches
        .add_shipment(&batch.batch_id, &shipment.shipment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, LogisticsError::Conflict(_)));

    let batch = batches
        .remove_shipment(&batch.batch_id, &shipment.shipment_id)
        .await
        .unwrap();
    assert_eq!(batch.total_packages, 0);
    assert_eq!(batch.total_cbm, dec!(0.0));
    assert_eq!(batch.utilization_percentage, 0);

    let shipment = shipments.get(&shipment.shipment_id).await.unwrap();
    assert_eq!(shipment.batch_id, None);
}

#[tokio::test]
async fn test_remove_shipment_not_in_batch_rejected() {
    let repo = repo();
    let shipments = shipment_service(&repo);
    let batches = batch_service(&repo);

    let batch = batches
        .create(NewBatch {
            batch_number: "AIR-2024-01".to_string(),
            shipment_type: ShipmentType::Air,
            container_size: "ULD".to_string(),
            capacity_limit: None,
            estimated_departure: None,
            estimated_arrival: None,
            total_cost: None,
        })
        .await
        .unwrap();
    let shipment = shipments.create(new_shipment("GHA-005")).await.unwrap();

    let err = batches
        .remove_shipment(&batch.batch_id, &shipment.shipment_id)
        .await
        .unwrap_err();
    assert!(matches!(err, LogisticsError::Validation(_)));
}

#[tokio::test]
async fn test_negative_invoice_amount_rejected() {
    let repo = repo();
    let invoices = InvoiceService::new(Arc::clone(&repo));

    let err = invoices
        .create(NewInvoice {
            client_id: None,
            client_name: "Ama Mensah".to_string(),
            amount: dec!(-10.00),
            currency: None,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            items: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LogisticsError::Validation(_)));
}

#[tokio::test]
async fn test_quote_without_rate_card_is_not_found() {
    let repo = repo();
    let pricing = PricingService::new(Arc::clone(&repo));

    let err = pricing
        .quote(ShipmentType::Air, Some(dec!(10.0)), None)
        .await
        .unwrap_err();
    assert!(matches!(err, LogisticsError::NotFound("pricing rate")));
}

#[tokio::test]
async fn test_quote_prefers_weight_pricing() {
    let repo = repo();
    let pricing = PricingService::new(Arc::clone(&repo));

    pricing
        .create(crate::application::NewPricingRate {
            shipment_type: ShipmentType::Air,
            rate_per_kg: Some(dec!(12.50)),
            rate_per_cbm: Some(dec!(300.00)),
            exchange_rate: None,
            notes: None,
        })
        .await
        .unwrap();

    let quote = pricing
        .quote(ShipmentType::Air, Some(dec!(4.0)), Some(dec!(1.0)))
        .await
        .unwrap();
    assert_eq!(quote.cost, dec!(50.00));

    let quote = pricing
        .quote(ShipmentType::Air, None, Some(dec!(2.0)))
        .await
        .unwrap();
    assert_eq!(quote.cost, dec!(600.00));

    let err = pricing
        .quote(ShipmentType::Air, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LogisticsError::Validation(_)));
}

#[tokio::test]
async fn test_deactivated_rate_is_skipped() {
    let repo = repo();
    let pricing = PricingService::new(Arc::clone(&repo));

    let rate = pricing
        .create(crate::application::NewPricingRate {
            shipment_type: ShipmentType::Sea,
            rate_per_kg: None,
            rate_per_cbm: Some(dec!(250.00)),
            exchange_rate: None,
            notes: None,
        })
        .await
        .unwrap();
    pricing
        .update(
            &rate.pricing_rate_id,
            PricingRatePatch {
                is_active: Some(false),
                ..PricingRatePatch::default()
            },
        )
        .await
        .unwrap();

    let err = pricing
        .quote(ShipmentType::Sea, None, Some(dec!(1.0)))
        .await
        .unwrap_err();
    assert!(matches!(err, LogisticsError::NotFound(_)));
}

#[tokio::test]
async fn test_update_refreshes_updated_at() {
    let repo = repo();
    let clients = ClientService::new(Arc::clone(&repo));

    let client = clients
        .create(NewClient {
            name: "Kofi Boateng".to_string(),
            ..NewClient::default()
        })
        .await
        .unwrap();

    let updated = clients
        .update(
            &client.client_id,
            crate::application::ClientPatch {
                phone: Some("+233201234567".to_string()),
                ..crate::application::ClientPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("+233201234567"));
    assert!(updated.updated_at >= client.updated_at);
}
