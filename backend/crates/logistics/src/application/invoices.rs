//! Invoice Management Use Cases

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::entity::Invoice;
use crate::domain::repository::InvoiceRepository;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::{ClientId, InvoiceId};

#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub due_date: NaiveDate,
    pub items: Option<serde_json::Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoicePatch {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub items: Option<serde_json::Value>,
    pub notes: Option<String>,
}

pub struct InvoiceService<I> {
    invoices: Arc<I>,
}

impl<I> Clone for InvoiceService<I> {
    fn clone(&self) -> Self {
        Self {
            invoices: Arc::clone(&self.invoices),
        }
    }
}

impl<I: InvoiceRepository> InvoiceService<I> {
    pub fn new(invoices: Arc<I>) -> Self {
        Self { invoices }
    }

    pub async fn create(&self, input: NewInvoice) -> LogisticsResult<Invoice> {
        if input.client_name.trim().is_empty() {
            return Err(LogisticsError::Validation(
                "Client name is required".to_string(),
            ));
        }
        if input.amount < Decimal::ZERO {
            return Err(LogisticsError::Validation(
                "Invoice amount must not be negative".to_string(),
            ));
        }

        let mut invoice = Invoice::new(
            input.client_name.trim().to_string(),
            input.amount,
            input.due_date,
        );
        invoice.client_id = input.client_id;
        if let Some(currency) = input.currency {
            invoice.currency = currency;
        }
        if let Some(items) = input.items {
            invoice.items = items;
        }
        invoice.notes = input.notes;

        self.invoices.create(&invoice).await?;
        Ok(invoice)
    }

    pub async fn get(&self, invoice_id: &InvoiceId) -> LogisticsResult<Invoice> {
        self.invoices
            .find_by_id(invoice_id)
            .await?
            .ok_or(LogisticsError::NotFound("invoice"))
    }

    pub async fn list(&self) -> LogisticsResult<Vec<Invoice>> {
        self.invoices.list().await
    }

    pub async fn update(
        &self,
        invoice_id: &InvoiceId,
        patch: InvoicePatch,
    ) -> LogisticsResult<Invoice> {
        let mut invoice = self.get(invoice_id).await?;

        if let Some(amount) = patch.amount {
            if amount < Decimal::ZERO {
                return Err(LogisticsError::Validation(
                    "Invoice amount must not be negative".to_string(),
                ));
            }
            invoice.amount = amount;
        }
        if let Some(currency) = patch.currency {
            invoice.currency = currency;
        }
        if let Some(status) = patch.status {
            invoice.status = status;
        }
        if let Some(due_date) = patch.due_date {
            invoice.due_date = due_date;
        }
        if let Some(items) = patch.items {
            invoice.items = items;
        }
        if let Some(notes) = patch.notes {
            invoice.notes = Some(notes);
        }
        invoice.touch();

        self.invoices.update(&invoice).await?;
        Ok(invoice)
    }

    pub async fn delete(&self, invoice_id: &InvoiceId) -> LogisticsResult<()> {
        self.get(invoice_id).await?;
        self.invoices.delete(invoice_id).await
    }
}
