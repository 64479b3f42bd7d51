//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    Batch, BatchShipment, Client, Invoice, Payment, PaymentShipment, PricingRate, Shipment,
};
use crate::domain::repository::{
    BatchRepository, ClientRepository, InvoiceRepository, PaymentRepository,
    PricingRateRepository, ShipmentRepository,
};
use crate::domain::value_object::ShipmentType;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::{BatchId, ClientId, InvoiceId, PaymentId, PricingRateId, ShipmentId};

/// PostgreSQL-backed logistics repository
#[derive(Clone)]
pub struct PgLogisticsRepository {
    pool: PgPool,
}

impl PgLogisticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SHIPMENT_COLUMNS: &str = r#"
    id, client_id, tracking_number, type, status, client_name,
    client_phone, client_email, item_number, packages, weight, cbm,
    cost, eta, etd, notes, send_notification, batch_id,
    created_at, updated_at
"#;

// ============================================================================
// Client Repository Implementation
// ============================================================================

impl ClientRepository for PgLogisticsRepository {
    async fn create(&self, client: &Client) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, name, email, phone, address, total_shipments,
                total_spent, join_date, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(client.client_id.as_uuid())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.total_shipments)
        .bind(client.total_spent)
        .bind(client.join_date)
        .bind(&client.notes)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, client_id: &ClientId) -> LogisticsResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, email, phone, address, total_shipments,
                   total_spent, join_date, notes, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ClientRow::into_client))
    }

    async fn list(&self) -> LogisticsResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, email, phone, address, total_shipments,
                   total_spent, join_date, notes, created_at, updated_at
            FROM clients
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ClientRow::into_client).collect())
    }

    async fn update(&self, client: &Client) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            UPDATE clients SET
                name = $2, email = $3, phone = $4, address = $5,
                total_shipments = $6, total_spent = $7, join_date = $8,
                notes = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(client.client_id.as_uuid())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.total_shipments)
        .bind(client.total_spent)
        .bind(client.join_date)
        .bind(&client.notes)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, client_id: &ClientId) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Batch Repository Implementation
// ============================================================================

impl BatchRepository for PgLogisticsRepository {
    async fn create(&self, batch: &Batch) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO batches (
                id, batch_number, type, container_size, status,
                total_packages, total_weight, total_cbm,
                utilization_percentage, capacity_limit,
                estimated_departure, estimated_arrival, total_cost,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(batch.batch_id.as_uuid())
        .bind(&batch.batch_number)
        .bind(batch.shipment_type.code())
        .bind(&batch.container_size)
        .bind(&batch.status)
        .bind(batch.total_packages)
        .bind(batch.total_weight)
        .bind(batch.total_cbm)
        .bind(batch.utilization_percentage)
        .bind(batch.capacity_limit)
        .bind(batch.estimated_departure)
        .bind(batch.estimated_arrival)
        .bind(batch.total_cost)
        .bind(batch.created_at)
        .bind(batch.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, batch_id: &BatchId) -> LogisticsResult<Option<Batch>> {
        let row = sqlx::query_as::<_, BatchRow>(
            r#"
            SELECT id, batch_number, type, container_size, status,
                   total_packages, total_weight, total_cbm,
                   utilization_percentage, capacity_limit,
                   estimated_departure, estimated_arrival, total_cost,
                   created_at, updated_at
            FROM batches
            WHERE id = $1
            "#,
        )
        .bind(batch_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BatchRow::into_batch).transpose()
    }

    async fn list(&self) -> LogisticsResult<Vec<Batch>> {
        let rows = sqlx::query_as::<_, BatchRow>(
            r#"
            SELECT id, batch_number, type, container_size, status,
                   total_packages, total_weight, total_cbm,
                   utilization_percentage, capacity_limit,
                   estimated_departure, estimated_arrival, total_cost,
                   created_at, updated_at
            FROM batches
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BatchRow::into_batch).collect()
    }

    async fn update(&self, batch: &Batch) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            UPDATE batches SET
                batch_number = $2, type = $3, container_size = $4,
                status = $5, total_packages = $6, total_weight = $7,
                total_cbm = $8, utilization_percentage = $9,
                capacity_limit = $10, estimated_departure = $11,
                estimated_arrival = $12, total_cost = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(batch.batch_id.as_uuid())
        .bind(&batch.batch_number)
        .bind(batch.shipment_type.code())
        .bind(&batch.container_size)
        .bind(&batch.status)
        .bind(batch.total_packages)
        .bind(batch.total_weight)
        .bind(batch.total_cbm)
        .bind(batch.utilization_percentage)
        .bind(batch.capacity_limit)
        .bind(batch.estimated_departure)
        .bind(batch.estimated_arrival)
        .bind(batch.total_cost)
        .bind(batch.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, batch_id: &BatchId) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM batch_shipments WHERE batch_id = $1")
            .bind(batch_id.as_uuid())
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(batch_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        let junction = BatchShipment::new(*batch_id, *shipment_id);
        sqlx::query(
            r#"
            INSERT INTO batch_shipments (id, batch_id, shipment_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(junction.id)
        .bind(junction.batch_id.as_uuid())
        .bind(junction.shipment_id.as_uuid())
        .bind(junction.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_shipment(
        &self,
        batch_id: &BatchId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM batch_shipments WHERE batch_id = $1 AND shipment_id = $2")
            .bind(batch_id.as_uuid())
            .bind(shipment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_shipments(&self, batch_id: &BatchId) -> LogisticsResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(&format!(
            r#"
            SELECT {SHIPMENT_COLUMNS}
            FROM shipments
            WHERE id IN (SELECT shipment_id FROM batch_shipments WHERE batch_id = $1)
            ORDER BY created_at DESC
            "#,
        ))
        .bind(batch_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ShipmentRow::into_shipment).collect()
    }
}

// ============================================================================
// Shipment Repository Implementation
// ============================================================================

impl ShipmentRepository for PgLogisticsRepository {
    async fn create(&self, shipment: &Shipment) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO shipments (
                id, client_id, tracking_number, type, status, client_name,
                client_phone, client_email, item_number, packages, weight,
                cbm, cost, eta, etd, notes, send_notification, batch_id,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(shipment.shipment_id.as_uuid())
        .bind(shipment.client_id.map(|id| id.into_uuid()))
        .bind(&shipment.tracking_number)
        .bind(shipment.shipment_type.code())
        .bind(&shipment.status)
        .bind(&shipment.client_name)
        .bind(&shipment.client_phone)
        .bind(&shipment.client_email)
        .bind(&shipment.item_number)
        .bind(shipment.packages)
        .bind(shipment.weight)
        .bind(shipment.cbm)
        .bind(shipment.cost)
        .bind(shipment.eta)
        .bind(shipment.etd)
        .bind(&shipment.notes)
        .bind(shipment.send_notification)
        .bind(shipment.batch_id.map(|id| id.into_uuid()))
        .bind(shipment.created_at)
        .bind(shipment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, shipment_id: &ShipmentId) -> LogisticsResult<Option<Shipment>> {
        let row = sqlx::query_as::<_, ShipmentRow>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE id = $1"
        ))
        .bind(shipment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ShipmentRow::into_shipment).transpose()
    }

    async fn find_by_tracking_number(&self, tracking: &str) -> LogisticsResult<Option<Shipment>> {
        let row = sqlx::query_as::<_, ShipmentRow>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE tracking_number = $1"
        ))
        .bind(tracking)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ShipmentRow::into_shipment).transpose()
    }

    async fn list(&self) -> LogisticsResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ShipmentRow::into_shipment).collect()
    }

    async fn list_for_client(&self, client_id: &ClientId) -> LogisticsResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE client_id = $1 ORDER BY created_at DESC"
        ))
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ShipmentRow::into_shipment).collect()
    }

    async fn update(&self, shipment: &Shipment) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            UPDATE shipments SET
                client_id = $2, tracking_number = $3, type = $4, status = $5,
                client_name = $6, client_phone = $7, client_email = $8,
                item_number = $9, packages = $10, weight = $11, cbm = $12,
                cost = $13, eta = $14, etd = $15, notes = $16,
                send_notification = $17, batch_id = $18, updated_at = $19
            WHERE id = $1
            "#,
        )
        .bind(shipment.shipment_id.as_uuid())
        .bind(shipment.client_id.map(|id| id.into_uuid()))
        .bind(&shipment.tracking_number)
        .bind(shipment.shipment_type.code())
        .bind(&shipment.status)
        .bind(&shipment.client_name)
        .bind(&shipment.client_phone)
        .bind(&shipment.client_email)
        .bind(&shipment.item_number)
        .bind(shipment.packages)
        .bind(shipment.weight)
        .bind(shipment.cbm)
        .bind(shipment.cost)
        .bind(shipment.eta)
        .bind(shipment.etd)
        .bind(&shipment.notes)
        .bind(shipment.send_notification)
        .bind(shipment.batch_id.map(|id| id.into_uuid()))
        .bind(shipment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, shipment_id: &ShipmentId) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM batch_shipments WHERE shipment_id = $1")
            .bind(shipment_id.as_uuid())
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM payment_shipments WHERE shipment_id = $1")
            .bind(shipment_id.as_uuid())
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM shipments WHERE id = $1")
            .bind(shipment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Invoice Repository Implementation
// ============================================================================

impl InvoiceRepository for PgLogisticsRepository {
    async fn create(&self, invoice: &Invoice) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, client_id, client_name, amount, currency, status,
                due_date, items, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(invoice.invoice_id.as_uuid())
        .bind(invoice.client_id.map(|id| id.into_uuid()))
        .bind(&invoice.client_name)
        .bind(invoice.amount)
        .bind(&invoice.currency)
        .bind(&invoice.status)
        .bind(invoice.due_date)
        .bind(&invoice.items)
        .bind(&invoice.notes)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, invoice_id: &InvoiceId) -> LogisticsResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, client_id, client_name, amount, currency, status,
                   due_date, items, notes, created_at, updated_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(invoice_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InvoiceRow::into_invoice))
    }

    async fn list(&self) -> LogisticsResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, client_id, client_name, amount, currency, status,
                   due_date, items, notes, created_at, updated_at
            FROM invoices
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InvoiceRow::into_invoice).collect())
    }

    async fn update(&self, invoice: &Invoice) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            UPDATE invoices SET
                client_id = $2, client_name = $3, amount = $4, currency = $5,
                status = $6, due_date = $7, items = $8, notes = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(invoice.invoice_id.as_uuid())
        .bind(invoice.client_id.map(|id| id.into_uuid()))
        .bind(&invoice.client_name)
        .bind(invoice.amount)
        .bind(&invoice.currency)
        .bind(&invoice.status)
        .bind(invoice.due_date)
        .bind(&invoice.items)
        .bind(&invoice.notes)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, invoice_id: &InvoiceId) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(invoice_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgLogisticsRepository {
    async fn create(&self, payment: &Payment) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, client_id, client_name, amount, currency, payment_mode,
                transaction_id, status, invoice_number, receipt_number,
                reference_number, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.client_id.map(|id| id.into_uuid()))
        .bind(&payment.client_name)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(&payment.payment_mode)
        .bind(&payment.transaction_id)
        .bind(&payment.status)
        .bind(&payment.invoice_number)
        .bind(&payment.receipt_number)
        .bind(&payment.reference_number)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, payment_id: &PaymentId) -> LogisticsResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, client_id, client_name, amount, currency, payment_mode,
                   transaction_id, status, invoice_number, receipt_number,
                   reference_number, notes, created_at, updated_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(payment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PaymentRow::into_payment))
    }

    async fn list(&self) -> LogisticsResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, client_id, client_name, amount, currency, payment_mode,
                   transaction_id, status, invoice_number, receipt_number,
                   reference_number, notes, created_at, updated_at
            FROM payments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PaymentRow::into_payment).collect())
    }

    async fn update(&self, payment: &Payment) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            UPDATE payments SET
                client_id = $2, client_name = $3, amount = $4, currency = $5,
                payment_mode = $6, transaction_id = $7, status = $8,
                invoice_number = $9, receipt_number = $10,
                reference_number = $11, notes = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.client_id.map(|id| id.into_uuid()))
        .bind(&payment.client_name)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(&payment.payment_mode)
        .bind(&payment.transaction_id)
        .bind(&payment.status)
        .bind(&payment.invoice_number)
        .bind(&payment.receipt_number)
        .bind(&payment.reference_number)
        .bind(&payment.notes)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, payment_id: &PaymentId) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM payment_shipments WHERE payment_id = $1")
            .bind(payment_id.as_uuid())
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(payment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn link_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        let junction = PaymentShipment::new(*payment_id, *shipment_id);
        sqlx::query(
            r#"
            INSERT INTO payment_shipments (id, payment_id, shipment_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(junction.id)
        .bind(junction.payment_id.as_uuid())
        .bind(junction.shipment_id.as_uuid())
        .bind(junction.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn unlink_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM payment_shipments WHERE payment_id = $1 AND shipment_id = $2")
            .bind(payment_id.as_uuid())
            .bind(shipment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_shipments(&self, payment_id: &PaymentId) -> LogisticsResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(&format!(
            r#"
            SELECT {SHIPMENT_COLUMNS}
            FROM shipments
            WHERE id IN (SELECT shipment_id FROM payment_shipments WHERE payment_id = $1)
            ORDER BY created_at DESC
            "#,
        ))
        .bind(payment_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ShipmentRow::into_shipment).collect()
    }
}

// ============================================================================
// Pricing Rate Repository Implementation
// ============================================================================

impl PricingRateRepository for PgLogisticsRepository {
    async fn create(&self, rate: &PricingRate) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pricing_rates (
                id, shipment_type, rate_per_kg, rate_per_cbm, exchange_rate,
                is_active, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(rate.pricing_rate_id.as_uuid())
        .bind(rate.shipment_type.code())
        .bind(rate.rate_per_kg)
        .bind(rate.rate_per_cbm)
        .bind(rate.exchange_rate)
        .bind(rate.is_active)
        .bind(&rate.notes)
        .bind(rate.created_at)
        .bind(rate.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, rate_id: &PricingRateId) -> LogisticsResult<Option<PricingRate>> {
        let row = sqlx::query_as::<_, PricingRateRow>(
            r#"
            SELECT id, shipment_type, rate_per_kg, rate_per_cbm, exchange_rate,
                   is_active, notes, created_at, updated_at
            FROM pricing_rates
            WHERE id = $1
            "#,
        )
        .bind(rate_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PricingRateRow::into_rate).transpose()
    }

    async fn find_active(
        &self,
        shipment_type: ShipmentType,
    ) -> LogisticsResult<Option<PricingRate>> {
        let row = sqlx::query_as::<_, PricingRateRow>(
            r#"
            SELECT id, shipment_type, rate_per_kg, rate_per_cbm, exchange_rate,
                   is_active, notes, created_at, updated_at
            FROM pricing_rates
            WHERE shipment_type = $1 AND is_active
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(shipment_type.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PricingRateRow::into_rate).transpose()
    }

    async fn list(&self) -> LogisticsResult<Vec<PricingRate>> {
        let rows = sqlx::query_as::<_, PricingRateRow>(
            r#"
            SELECT id, shipment_type, rate_per_kg, rate_per_cbm, exchange_rate,
                   is_active, notes, created_at, updated_at
            FROM pricing_rates
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PricingRateRow::into_rate).collect()
    }

    async fn update(&self, rate: &PricingRate) -> LogisticsResult<()> {
        sqlx::query(
            r#"
            UPDATE pricing_rates SET
                shipment_type = $2, rate_per_kg = $3, rate_per_cbm = $4,
                exchange_rate = $5, is_active = $6, notes = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(rate.pricing_rate_id.as_uuid())
        .bind(rate.shipment_type.code())
        .bind(rate.rate_per_kg)
        .bind(rate.rate_per_cbm)
        .bind(rate.exchange_rate)
        .bind(rate.is_active)
        .bind(&rate.notes)
        .bind(rate.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, rate_id: &PricingRateId) -> LogisticsResult<()> {
        sqlx::query("DELETE FROM pricing_rates WHERE id = $1")
            .bind(rate_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    total_shipments: i32,
    total_spent: Decimal,
    join_date: Option<NaiveDate>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Client {
        Client {
            client_id: ClientId::from_uuid(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            total_shipments: self.total_shipments,
            total_spent: self.total_spent,
            join_date: self.join_date,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BatchRow {
    id: Uuid,
    batch_number: String,
    #[sqlx(rename = "type")]
    shipment_type: String,
    container_size: String,
    status: String,
    total_packages: i32,
    total_weight: Decimal,
    total_cbm: Decimal,
    utilization_percentage: i32,
    capacity_limit: Decimal,
    estimated_departure: Option<NaiveDate>,
    estimated_arrival: Option<NaiveDate>,
    total_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BatchRow {
    fn into_batch(self) -> LogisticsResult<Batch> {
        let shipment_type = ShipmentType::from_code(&self.shipment_type).ok_or_else(|| {
            LogisticsError::Internal(format!("Invalid shipment type: {}", self.shipment_type))
        })?;

        Ok(Batch {
            batch_id: BatchId::from_uuid(self.id),
            batch_number: self.batch_number,
            shipment_type,
            container_size: self.container_size,
            status: self.status,
            total_packages: self.total_packages,
            total_weight: self.total_weight,
            total_cbm: self.total_cbm,
            utilization_percentage: self.utilization_percentage,
            capacity_limit: self.capacity_limit,
            estimated_departure: self.estimated_departure,
            estimated_arrival: self.estimated_arrival,
            total_cost: self.total_cost,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ShipmentRow {
    id: Uuid,
    client_id: Option<Uuid>,
    tracking_number: String,
    #[sqlx(rename = "type")]
    shipment_type: String,
    status: String,
    client_name: String,
    client_phone: Option<String>,
    client_email: Option<String>,
    item_number: Option<String>,
    packages: i32,
    weight: Option<Decimal>,
    cbm: Option<Decimal>,
    cost: Decimal,
    eta: Option<NaiveDate>,
    etd: Option<NaiveDate>,
    notes: Option<String>,
    send_notification: bool,
    batch_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ShipmentRow {
    fn into_shipment(self) -> LogisticsResult<Shipment> {
        let shipment_type = ShipmentType::from_code(&self.shipment_type).ok_or_else(|| {
            LogisticsError::Internal(format!("Invalid shipment type: {}", self.shipment_type))
        })?;

        Ok(Shipment {
            shipment_id: ShipmentId::from_uuid(self.id),
            client_id: self.client_id.map(ClientId::from_uuid),
            tracking_number: self.tracking_number,
            shipment_type,
            status: self.status,
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
            batch_id: self.batch_id.map(BatchId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    client_id: Option<Uuid>,
    client_name: String,
    amount: Decimal,
    currency: String,
    status: String,
    due_date: NaiveDate,
    items: serde_json::Value,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self) -> Invoice {
        Invoice {
            invoice_id: InvoiceId::from_uuid(self.id),
            client_id: self.client_id.map(ClientId::from_uuid),
            client_name: self.client_name,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            due_date: self.due_date,
            items: self.items,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    client_id: Option<Uuid>,
    client_name: String,
    amount: Decimal,
    currency: String,
    payment_mode: String,
    transaction_id: String,
    status: String,
    invoice_number: Option<String>,
    receipt_number: Option<String>,
    reference_number: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> Payment {
        Payment {
            payment_id: PaymentId::from_uuid(self.id),
            client_id: self.client_id.map(ClientId::from_uuid),
            client_name: self.client_name,
            amount: self.amount,
            currency: self.currency,
            payment_mode: self.payment_mode,
            transaction_id: self.transaction_id,
            status: self.status,
            invoice_number: self.invoice_number,
            receipt_number: self.receipt_number,
            reference_number: self.reference_number,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PricingRateRow {
    id: Uuid,
    shipment_type: String,
    rate_per_kg: Option<Decimal>,
    rate_per_cbm: Option<Decimal>,
    exchange_rate: Decimal,
    is_active: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PricingRateRow {
    fn into_rate(self) -> LogisticsResult<PricingRate> {
        let shipment_type = ShipmentType::from_code(&self.shipment_type).ok_or_else(|| {
            LogisticsError::Internal(format!("Invalid shipment type: {}", self.shipment_type))
        })?;

        Ok(PricingRate {
            pricing_rate_id: PricingRateId::from_uuid(self.id),
            shipment_type,
            rate_per_kg: self.rate_per_kg,
            rate_per_cbm: self.rate_per_cbm,
            exchange_rate: self.exchange_rate,
            is_active: self.is_active,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
