//! Application Layer — Use Cases

pub mod batches;
pub mod clients;
pub mod invoices;
pub mod payments;
pub mod pricing;
pub mod shipments;

pub use batches::{BatchPatch, BatchService, NewBatch};
pub use clients::{ClientPatch, ClientService, NewClient};
pub use invoices::{InvoicePatch, InvoiceService, NewInvoice};
pub use payments::{NewPayment, PaymentPatch, PaymentService};
pub use pricing::{NewPricingRate, PricingRatePatch, PricingService, Quote};
pub use shipments::{NewShipment, ShipmentPatch, ShipmentService};
