//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the dashboard gate.

pub mod dto;
pub mod gate;
pub mod handlers;
pub mod router;

pub use gate::{dashboard_gate, is_protected, redirect_target, require_admin};
pub use handlers::AuthAppState;
pub use router::{admin_gated, auth_router, auth_router_generic, gate_router};
