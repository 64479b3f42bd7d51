//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::application::{
    BatchService, ClientService, InvoiceService, PaymentService, PricingService, ShipmentService,
};
use crate::domain::repository::LogisticsRepository;
use crate::error::LogisticsResult;
use crate::presentation::dto::{
    BatchResponse, BatchShipmentRequest, ClientResponse, CreateBatchRequest, CreateClientRequest,
    CreateInvoiceRequest, CreatePaymentRequest, CreatePricingRateRequest, CreateShipmentRequest,
    InvoiceResponse, PaymentResponse, PaymentShipmentRequest, PricingRateResponse, QuoteQuery,
    QuoteResponse, ShipmentResponse, UpdateBatchRequest, UpdateClientRequest,
    UpdateInvoiceRequest, UpdatePaymentRequest, UpdatePricingRateRequest, UpdateShipmentRequest,
};
use kernel::id::{BatchId, ClientId, InvoiceId, PaymentId, PricingRateId, ShipmentId};

/// Shared state for the logistics routes: one repository fanned out
/// into per-entity services.
pub struct LogisticsAppState<R> {
    pub clients: ClientService<R>,
    pub batches: BatchService<R, R>,
    pub shipments: ShipmentService<R, R>,
    pub invoices: InvoiceService<R>,
    pub payments: PaymentService<R, R>,
    pub pricing: PricingService<R>,
}

impl<R> Clone for LogisticsAppState<R> {
    fn clone(&self) -> Self {
        Self {
            clients: self.clients.clone(),
            batches: self.batches.clone(),
            shipments: self.shipments.clone(),
            invoices: self.invoices.clone(),
            payments: self.payments.clone(),
            pricing: self.pricing.clone(),
        }
    }
}

impl<R: LogisticsRepository> LogisticsAppState<R> {
    pub fn new(repo: R) -> Self {
        let repo = Arc::new(repo);
        Self {
            clients: ClientService::new(Arc::clone(&repo)),
            batches: BatchService::new(Arc::clone(&repo), Arc::clone(&repo)),
            shipments: ShipmentService::new(Arc::clone(&repo), Arc::clone(&repo)),
            invoices: InvoiceService::new(Arc::clone(&repo)),
            payments: PaymentService::new(Arc::clone(&repo), Arc::clone(&repo)),
            pricing: PricingService::new(repo),
        }
    }
}

// ============================================================================
// Client Handlers
// ============================================================================

pub async fn create_client<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Json(request): Json<CreateClientRequest>,
) -> LogisticsResult<(StatusCode, Json<ClientResponse>)> {
    let client = state.clients.create(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

pub async fn list_clients<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
) -> LogisticsResult<Json<Vec<ClientResponse>>> {
    let clients = state.clients.list().await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

pub async fn get_client<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<ClientResponse>> {
    let client = state.clients.get(&ClientId::from_uuid(id)).await?;
    Ok(Json(client.into()))
}

pub async fn update_client<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> LogisticsResult<Json<ClientResponse>> {
    let client = state
        .clients
        .update(&ClientId::from_uuid(id), request.into_patch())
        .await?;
    Ok(Json(client.into()))
}

pub async fn delete_client<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<StatusCode> {
    state.clients.delete(&ClientId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_client_shipments<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<Vec<ShipmentResponse>>> {
    let client_id = ClientId::from_uuid(id);
    state.clients.get(&client_id).await?;
    let shipments = state.shipments.list_for_client(&client_id).await?;
    Ok(Json(shipments.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Batch Handlers
// ============================================================================

pub async fn create_batch<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Json(request): Json<CreateBatchRequest>,
) -> LogisticsResult<(StatusCode, Json<BatchResponse>)> {
    let batch = state.batches.create(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(batch.into())))
}

pub async fn list_batches<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
) -> LogisticsResult<Json<Vec<BatchResponse>>> {
    let batches = state.batches.list().await?;
    Ok(Json(batches.into_iter().map(Into::into).collect()))
}

pub async fn get_batch<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<BatchResponse>> {
    let batch = state.batches.get(&BatchId::from_uuid(id)).await?;
    Ok(Json(batch.into()))
}

pub async fn update_batch<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBatchRequest>,
) -> LogisticsResult<Json<BatchResponse>> {
    let batch = state
        .batches
        .update(&BatchId::from_uuid(id), request.into_patch())
        .await?;
    Ok(Json(batch.into()))
}

pub async fn delete_batch<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<StatusCode> {
    state.batches.delete(&BatchId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_batch_shipments<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<Vec<ShipmentResponse>>> {
    let shipments = state
        .batches
        .list_shipments(&BatchId::from_uuid(id))
        .await?;
    Ok(Json(shipments.into_iter().map(Into::into).collect()))
}

pub async fn add_batch_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<BatchShipmentRequest>,
) -> LogisticsResult<Json<BatchResponse>> {
    let batch = state
        .batches
        .add_shipment(
            &BatchId::from_uuid(id),
            &ShipmentId::from_uuid(request.shipment_id),
        )
        .await?;
    Ok(Json(batch.into()))
}

pub async fn remove_batch_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path((id, shipment_id)): Path<(Uuid, Uuid)>,
) -> LogisticsResult<Json<BatchResponse>> {
    let batch = state
        .batches
        .remove_shipment(
            &BatchId::from_uuid(id),
            &ShipmentId::from_uuid(shipment_id),
        )
        .await?;
    Ok(Json(batch.into()))
}

// ============================================================================
// Shipment Handlers
// ============================================================================

pub async fn create_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Json(request): Json<CreateShipmentRequest>,
) -> LogisticsResult<(StatusCode, Json<ShipmentResponse>)> {
    let shipment = state.shipments.create(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(shipment.into())))
}

pub async fn list_shipments<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
) -> LogisticsResult<Json<Vec<ShipmentResponse>>> {
    let shipments = state.shipments.list().await?;
    Ok(Json(shipments.into_iter().map(Into::into).collect()))
}

pub async fn get_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<ShipmentResponse>> {
    let shipment = state.shipments.get(&ShipmentId::from_uuid(id)).await?;
    Ok(Json(shipment.into()))
}

pub async fn get_shipment_by_tracking<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(tracking): Path<String>,
) -> LogisticsResult<Json<ShipmentResponse>> {
    let shipment = state.shipments.get_by_tracking(&tracking).await?;
    Ok(Json(shipment.into()))
}

pub async fn update_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShipmentRequest>,
) -> LogisticsResult<Json<ShipmentResponse>> {
    let shipment = state
        .shipments
        .update(&ShipmentId::from_uuid(id), request.into_patch())
        .await?;
    Ok(Json(shipment.into()))
}

pub async fn delete_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<StatusCode> {
    state.shipments.delete(&ShipmentId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Invoice Handlers
// ============================================================================

pub async fn create_invoice<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Json(request): Json<CreateInvoiceRequest>,
) -> LogisticsResult<(StatusCode, Json<InvoiceResponse>)> {
    let invoice = state.invoices.create(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}

pub async fn list_invoices<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
) -> LogisticsResult<Json<Vec<InvoiceResponse>>> {
    let invoices = state.invoices.list().await?;
    Ok(Json(invoices.into_iter().map(Into::into).collect()))
}

pub async fn get_invoice<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<InvoiceResponse>> {
    let invoice = state.invoices.get(&InvoiceId::from_uuid(id)).await?;
    Ok(Json(invoice.into()))
}

pub async fn update_invoice<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> LogisticsResult<Json<InvoiceResponse>> {
    let invoice = state
        .invoices
        .update(&InvoiceId::from_uuid(id), request.into_patch())
        .await?;
    Ok(Json(invoice.into()))
}

pub async fn delete_invoice<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<StatusCode> {
    state.invoices.delete(&InvoiceId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Payment Handlers
// ============================================================================

pub async fn create_payment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Json(request): Json<CreatePaymentRequest>,
) -> LogisticsResult<(StatusCode, Json<PaymentResponse>)> {
    let payment = state.payments.create(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

pub async fn list_payments<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
) -> LogisticsResult<Json<Vec<PaymentResponse>>> {
    let payments = state.payments.list().await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

pub async fn get_payment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<PaymentResponse>> {
    let payment = state.payments.get(&PaymentId::from_uuid(id)).await?;
    Ok(Json(payment.into()))
}

pub async fn update_payment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> LogisticsResult<Json<PaymentResponse>> {
    let payment = state
        .payments
        .update(&PaymentId::from_uuid(id), request.into_patch())
        .await?;
    Ok(Json(payment.into()))
}

pub async fn delete_payment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<StatusCode> {
    state.payments.delete(&PaymentId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_payment_shipments<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<Vec<ShipmentResponse>>> {
    let shipments = state
        .payments
        .list_shipments(&PaymentId::from_uuid(id))
        .await?;
    Ok(Json(shipments.into_iter().map(Into::into).collect()))
}

pub async fn link_payment_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentShipmentRequest>,
) -> LogisticsResult<StatusCode> {
    state
        .payments
        .link_shipment(
            &PaymentId::from_uuid(id),
            &ShipmentId::from_uuid(request.shipment_id),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlink_payment_shipment<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path((id, shipment_id)): Path<(Uuid, Uuid)>,
) -> LogisticsResult<StatusCode> {
    state
        .payments
        .unlink_shipment(
            &PaymentId::from_uuid(id),
            &ShipmentId::from_uuid(shipment_id),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Pricing Rate Handlers
// ============================================================================

pub async fn create_pricing_rate<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Json(request): Json<CreatePricingRateRequest>,
) -> LogisticsResult<(StatusCode, Json<PricingRateResponse>)> {
    let rate = state.pricing.create(request.into_input()).await?;
    Ok((StatusCode::CREATED, Json(rate.into())))
}

pub async fn list_pricing_rates<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
) -> LogisticsResult<Json<Vec<PricingRateResponse>>> {
    let rates = state.pricing.list().await?;
    Ok(Json(rates.into_iter().map(Into::into).collect()))
}

pub async fn get_pricing_rate<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<Json<PricingRateResponse>> {
    let rate = state.pricing.get(&PricingRateId::from_uuid(id)).await?;
    Ok(Json(rate.into()))
}

pub async fn update_pricing_rate<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePricingRateRequest>,
) -> LogisticsResult<Json<PricingRateResponse>> {
    let rate = state
        .pricing
        .update(&PricingRateId::from_uuid(id), request.into_patch())
        .await?;
    Ok(Json(rate.into()))
}

pub async fn delete_pricing_rate<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Path(id): Path<Uuid>,
) -> LogisticsResult<StatusCode> {
    state.pricing.delete(&PricingRateId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn quote<R: LogisticsRepository>(
    State(state): State<LogisticsAppState<R>>,
    Query(query): Query<QuoteQuery>,
) -> LogisticsResult<Json<QuoteResponse>> {
    let quote = state
        .pricing
        .quote(query.shipment_type, query.weight, query.cbm)
        .await?;
    Ok(Json(quote.into()))
}
