//! Domain Entities

pub mod batch;
pub mod client;
pub mod invoice;
pub mod junction;
pub mod payment;
pub mod pricing_rate;
pub mod shipment;

pub use batch::Batch;
pub use client::Client;
pub use invoice::Invoice;
pub use junction::{BatchShipment, PaymentShipment};
pub use payment::Payment;
pub use pricing_rate::PricingRate;
pub use shipment::Shipment;
