//! Payment Management Use Cases

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entity::{Payment, Shipment};
use crate::domain::repository::{PaymentRepository, ShipmentRepository};
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::{ClientId, PaymentId, ShipmentId};

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub client_id: Option<ClientId>,
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

#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub payment_mode: Option<String>,
    pub status: Option<String>,
    pub invoice_number: Option<String>,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
}

pub struct PaymentService<P, S> {
    payments: Arc<P>,
    shipments: Arc<S>,
}

impl<P, S> Clone for PaymentService<P, S> {
    fn clone(&self) -> Self {
        Self {
            payments: Arc::clone(&self.payments),
            shipments: Arc::clone(&self.shipments),
        }
    }
}

impl<P: PaymentRepository, S: ShipmentRepository> PaymentService<P, S> {
    pub fn new(payments: Arc<P>, shipments: Arc<S>) -> Self {
        Self { payments, shipments }
    }

    pub async fn create(&self, input: NewPayment) -> LogisticsResult<Payment> {
        if input.reference_number.trim().is_empty() {
            return Err(LogisticsError::Validation(
                "Reference number is required".to_string(),
            ));
        }
        if input.amount < Decimal::ZERO {
            return Err(LogisticsError::Validation(
                "Payment amount must not be negative".to_string(),
            ));
        }

        let mut payment = Payment::new(
            input.client_name,
            input.amount,
            input.payment_mode,
            input.transaction_id,
            input.reference_number.trim().to_string(),
        );
        payment.client_id = input.client_id;
        if let Some(currency) = input.currency {
            payment.currency = currency;
        }
        payment.invoice_number = input.invoice_number;
        payment.receipt_number = input.receipt_number;
        payment.notes = input.notes;

        self.payments.create(&payment).await?;
        Ok(payment)
    }

    pub async fn get(&self, payment_id: &PaymentId) -> LogisticsResult<Payment> {
        self.payments
            .find_by_id(payment_id)
            .await?
            .ok_or(LogisticsError::NotFound("payment"))
    }

    pub async fn list(&self) -> LogisticsResult<Vec<Payment>> {
        self.payments.list().await
    }

    pub async fn update(
        &self,
        payment_id: &PaymentId,
        patch: PaymentPatch,
    ) -> LogisticsResult<Payment> {
        let mut payment = self.get(payment_id).await?;

        if let Some(amount) = patch.amount {
            if amount < Decimal::ZERO {
                return Err(LogisticsError::Validation(
                    "Payment amount must not be negative".to_string(),
                ));
            }
            payment.amount = amount;
        }
        if let Some(currency) = patch.currency {
            payment.currency = currency;
        }
        if let Some(payment_mode) = patch.payment_mode {
            payment.payment_mode = payment_mode;
        }
        if let Some(status) = patch.status {
            payment.status = status;
        }
        if let Some(invoice_number) = patch.invoice_number {
            payment.invoice_number = Some(invoice_number);
        }
        if let Some(receipt_number) = patch.receipt_number {
            payment.receipt_number = Some(receipt_number);
        }
        if let Some(notes) = patch.notes {
            payment.notes = Some(notes);
        }
        payment.touch();

        self.payments.update(&payment).await?;
        Ok(payment)
    }

    pub async fn delete(&self, payment_id: &PaymentId) -> LogisticsResult<()> {
        self.get(payment_id).await?;
        self.payments.delete(payment_id).await
    }

    /// Allocate a payment against a shipment.
    pub async fn link_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        self.get(payment_id).await?;
        self.shipments
            .find_by_id(shipment_id)
            .await?
            .ok_or(LogisticsError::NotFound("shipment"))?;

        self.payments.link_shipment(payment_id, shipment_id).await
    }

    pub async fn unlink_shipment(
        &self,
        payment_id: &PaymentId,
        shipment_id: &ShipmentId,
    ) -> LogisticsResult<()> {
        self.get(payment_id).await?;
        self.payments.unlink_shipment(payment_id, shipment_id).await
    }

    pub async fn list_shipments(&self, payment_id: &PaymentId) -> LogisticsResult<Vec<Shipment>> {
        self.get(payment_id).await?;
        self.payments.list_shipments(payment_id).await
    }
}
