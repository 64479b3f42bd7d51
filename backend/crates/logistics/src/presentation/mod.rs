//! Presentation Layer — HTTP API

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LogisticsAppState;
pub use router::{logistics_router, logistics_router_generic};
