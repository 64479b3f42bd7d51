//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Batch, BatchShipment, Client, Invoice, Payment, PaymentShipment, PricingRate, Shipment};
pub use repository::{
    BatchRepository, ClientRepository, InvoiceRepository, PaymentRepository,
    LogisticsRepository, PricingRateRepository, ShipmentRepository,
};
pub use value_object::ShipmentType;
