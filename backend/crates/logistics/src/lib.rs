//! Logistics Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Per-entity services (use cases)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Clients with rolled-forward shipment counts and lifetime spend
//! - Shipments with unique tracking numbers and per-client history
//! - Batches (air/sea container loads) with utilization tracking
//! - Invoices and payments, with payment-to-shipment allocation
//! - Pricing rates per shipment type and a quote helper

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use domain::value_object::ShipmentType;
pub use error::{LogisticsError, LogisticsResult};
pub use infra::postgres::PgLogisticsRepository;
pub use presentation::router::logistics_router;
