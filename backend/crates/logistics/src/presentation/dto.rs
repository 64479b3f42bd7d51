//! Request / Response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    BatchPatch, ClientPatch, InvoicePatch, NewBatch, NewClient, NewInvoice, NewPayment,
    NewPricingRate, NewShipment, PaymentPatch, PricingRatePatch, Quote, ShipmentPatch,
};
use crate::domain::entity::{Batch, Client, Invoice, Payment, PricingRate, Shipment};
use crate::domain::value_object::ShipmentType;
use kernel::id::ClientId;

// ============================================================================
// Clients
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateClientRequest {
    pub fn into_input(self) -> NewClient {
        NewClient {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            join_date: self.join_date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub total_spent: Option<Decimal>,
    pub notes: Option<String>,
}

impl UpdateClientRequest {
    pub fn into_patch(self) -> ClientPatch {
        ClientPatch {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            join_date: self.join_date,
            total_spent: self.total_spent,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub total_shipments: i32,
    pub total_spent: Decimal,
    pub join_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.client_id.into_uuid(),
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            total_shipments: client.total_shipments,
            total_spent: client.total_spent,
            join_date: client.join_date,
            notes: client.notes,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

// ============================================================================
// Batches
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    pub batch_number: String,
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    pub container_size: String,
    pub capacity_limit: Option<Decimal>,
    pub estimated_departure: Option<NaiveDate>,
    pub estimated_arrival: Option<NaiveDate>,
    pub total_cost: Option<Decimal>,
}

impl CreateBatchRequest {
    pub fn into_input(self) -> NewBatch {
        NewBatch {
            batch_number: self.batch_number,
            shipment_type: self.shipment_type,
            container_size: self.container_size,
            capacity_limit: self.capacity_limit,
            estimated_departure: self.estimated_departure,
            estimated_arrival: self.estimated_arrival,
            total_cost: self.total_cost,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchRequest {
    pub container_size: Option<String>,
    pub status: Option<String>,
    pub capacity_limit: Option<Decimal>,
    pub estimated_departure: Option<NaiveDate>,
    pub estimated_arrival: Option<NaiveDate>,
    pub total_cost: Option<Decimal>,
}

impl UpdateBatchRequest {
    pub fn into_patch(self) -> BatchPatch {
        BatchPatch {
            container_size: self.container_size,
            status: self.status,
            capacity_limit: self.capacity_limit,
            estimated_departure: self.estimated_departure,
            estimated_arrival: self.estimated_arrival,
            total_cost: self.total_cost,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub id: Uuid,
    pub batch_number: String,
    #[serde(rename = "type")]
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

impl From<Batch> for BatchResponse {
    fn from(batch: Batch) -> Self {
        Self {
            id: batch.batch_id.into_uuid(),
            batch_number: batch.batch_number,
            shipment_type: batch.shipment_type,
            container_size: batch.container_size,
            status: batch.status,
            total_packages: batch.total_packages,
            total_weight: batch.total_weight,
            total_cbm: batch.total_cbm,
            utilization_percentage: batch.utilization_percentage,
            capacity_limit: batch.capacity_limit,
            estimated_departure: batch.estimated_departure,
            estimated_arrival: batch.estimated_arrival,
            total_cost: batch.total_cost,
            created_at: batch.created_at,
            updated_at: batch.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchShipmentRequest {
    pub shipment_id: Uuid,
}

// ============================================================================
// Shipments
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub tracking_number: String,
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub item_number: Option<String>,
    #[serde(default)]
    pub packages: i32,
    pub weight: Option<Decimal>,
    pub cbm: Option<Decimal>,
    #[serde(default)]
    pub cost: Decimal,
    pub eta: Option<NaiveDate>,
    pub etd: Option<NaiveDate>,
    pub notes: Option<String>,
    pub send_notification: Option<bool>,
}

impl CreateShipmentRequest {
    pub fn into_input(self) -> NewShipment {
        NewShipment {
            tracking_number: self.tracking_number,
            shipment_type: self.shipment_type,
            client_id: self.client_id.map(ClientId::from_uuid),
            client_name: self.client_name,
            client_phone: self.client_phone,
            client_email: self.client_email,
            item_number: self.item_number,
            packages: self.packages,
            weight: self.weight,
            cbm: self.cbm,
            cost: self.cost,
            eta: self.eta,
            etd: self.etd,
            notes: self.notes,
            send_notification: self.send_notification,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentRequest {
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

impl UpdateShipmentRequest {
    pub fn into_patch(self) -> ShipmentPatch {
        ShipmentPatch {
            status: self.status,
            client_phone: self.client_phone,
            client_email: self.client_email,
            item_number: self.item_number,
            packages: self.packages,
            weight: self.weight,
            cbm: self.cbm,
            cost: self.cost,
            eta: self.eta,
            etd: self.etd,
            notes: self.notes,
            send_notification: self.send_notification,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub tracking_number: String,
    #[serde(rename = "type")]
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
    pub batch_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentResponse {
    fn from(shipment: Shipment) -> Self {
        Self {
            id: shipment.shipment_id.into_uuid(),
            client_id: shipment.client_id.map(|id| id.into_uuid()),
            tracking_number: shipment.tracking_number,
            shipment_type: shipment.shipment_type,
            status: shipment.status,
            client_name: shipment.client_name,
            client_phone: shipment.client_phone,
            client_email: shipment.client_email,
            item_number: shipment.item_number,
            packages: shipment.packages,
            weight: shipment.weight,
            cbm: shipment.cbm,
            cost: shipment.cost,
            eta: shipment.eta,
            etd: shipment.etd,
            notes: shipment.notes,
            send_notification: shipment.send_notification,
            batch_id: shipment.batch_id.map(|id| id.into_uuid()),
            created_at: shipment.created_at,
            updated_at: shipment.updated_at,
        }
    }
}

// ============================================================================
// Invoices
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub due_date: NaiveDate,
    pub items: Option<serde_json::Value>,
    pub notes: Option<String>,
}

impl CreateInvoiceRequest {
    pub fn into_input(self) -> NewInvoice {
        NewInvoice {
            client_id: self.client_id.map(ClientId::from_uuid),
            client_name: self.client_name,
            amount: self.amount,
            currency: self.currency,
            due_date: self.due_date,
            items: self.items,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub items: Option<serde_json::Value>,
    pub notes: Option<String>,
}

impl UpdateInvoiceRequest {
    pub fn into_patch(self) -> InvoicePatch {
        InvoicePatch {
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            due_date: self.due_date,
            items: self.items,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub due_date: NaiveDate,
    pub items: serde_json::Value,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.invoice_id.into_uuid(),
            client_id: invoice.client_id.map(|id| id.into_uuid()),
            client_name: invoice.client_name,
            amount: invoice.amount,
            currency: invoice.currency,
            status: invoice.status,
            due_date: invoice.due_date,
            items: invoice.items,
            notes: invoice.notes,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub payment_mode: String,
    pub transaction_id: String,
    pub reference_number: String,
    pub invoice_number: Option<String>,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
}

impl CreatePaymentRequest {
    pub fn into_input(self) -> NewPayment {
        NewPayment {
            client_id: self.client_id.map(ClientId::from_uuid),
            client_name: self.client_name,
            amount: self.amount,
            currency: self.currency,
            payment_mode: self.payment_mode,
            transaction_id: self.transaction_id,
            reference_number: self.reference_number,
            invoice_number: self.invoice_number,
            receipt_number: self.receipt_number,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub payment_mode: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePaymentRequest {
    pub fn into_patch(self) -> PaymentPatch {
        PaymentPatch {
            amount: self.amount,
            currency: self.currency,
            payment_mode: self.payment_mode,
            status: self.status,
            invoice_number: self.invoice_number,
            receipt_number: self.receipt_number,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_mode: String,
    pub transaction_id: String,
    pub status: String,
    pub invoice_number: Option<String>,
    pub receipt_number: Option<String>,
    pub reference_number: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.payment_id.into_uuid(),
            client_id: payment.client_id.map(|id| id.into_uuid()),
            client_name: payment.client_name,
            amount: payment.amount,
            currency: payment.currency,
            payment_mode: payment.payment_mode,
            transaction_id: payment.transaction_id,
            status: payment.status,
            invoice_number: payment.invoice_number,
            receipt_number: payment.receipt_number,
            reference_number: payment.reference_number,
            notes: payment.notes,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentShipmentRequest {
    pub shipment_id: Uuid,
}

// ============================================================================
// Pricing Rates
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingRateRequest {
    #[serde(rename = "shipmentType")]
    pub shipment_type: ShipmentType,
    pub rate_per_kg: Option<Decimal>,
    pub rate_per_cbm: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub notes: Option<String>,
}

impl CreatePricingRateRequest {
    pub fn into_input(self) -> NewPricingRate {
        NewPricingRate {
            shipment_type: self.shipment_type,
            rate_per_kg: self.rate_per_kg,
            rate_per_cbm: self.rate_per_cbm,
            exchange_rate: self.exchange_rate,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricingRateRequest {
    pub rate_per_kg: Option<Decimal>,
    pub rate_per_cbm: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

impl UpdatePricingRateRequest {
    pub fn into_patch(self) -> PricingRatePatch {
        PricingRatePatch {
            rate_per_kg: self.rate_per_kg,
            rate_per_cbm: self.rate_per_cbm,
            exchange_rate: self.exchange_rate,
            is_active: self.is_active,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRateResponse {
    pub id: Uuid,
    pub shipment_type: ShipmentType,
    pub rate_per_kg: Option<Decimal>,
    pub rate_per_cbm: Option<Decimal>,
    pub exchange_rate: Decimal,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PricingRate> for PricingRateResponse {
    fn from(rate: PricingRate) -> Self {
        Self {
            id: rate.pricing_rate_id.into_uuid(),
            shipment_type: rate.shipment_type,
            rate_per_kg: rate.rate_per_kg,
            rate_per_cbm: rate.rate_per_cbm,
            exchange_rate: rate.exchange_rate,
            is_active: rate.is_active,
            notes: rate.notes,
            created_at: rate.created_at,
            updated_at: rate.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    pub weight: Option<Decimal>,
    pub cbm: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(rename = "type")]
    pub shipment_type: ShipmentType,
    pub cost: Decimal,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            shipment_type: quote.shipment_type,
            cost: quote.cost,
        }
    }
}
