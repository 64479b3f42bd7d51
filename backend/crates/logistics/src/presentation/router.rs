//! Route Definitions

use axum::Router;
use axum::routing::{delete, get};

use crate::domain::repository::LogisticsRepository;
use crate::infra::PgLogisticsRepository;
use crate::presentation::handlers::{self, LogisticsAppState};

/// Routes for the logistics API, backed by Postgres.
pub fn logistics_router(repo: PgLogisticsRepository) -> Router {
    logistics_router_generic(repo)
}

/// Generic form, used by tests with in-memory repositories.
pub fn logistics_router_generic<R: LogisticsRepository>(repo: R) -> Router {
    let state = LogisticsAppState::new(repo);

    Router::new()
        .route(
            "/clients",
            get(handlers::list_clients::<R>).post(handlers::create_client::<R>),
        )
        .route(
            "/clients/{id}",
            get(handlers::get_client::<R>)
                .put(handlers::update_client::<R>)
                .delete(handlers::delete_client::<R>),
        )
        .route(
            "/clients/{id}/shipments",
            get(handlers::list_client_shipments::<R>),
        )
        .route(
            "/batches",
            get(handlers::list_batches::<R>).post(handlers::create_batch::<R>),
        )
        .route(
            "/batches/{id}",
            get(handlers::get_batch::<R>)
                .put(handlers::update_batch::<R>)
                .delete(handlers::delete_batch::<R>),
        )
        .route(
            "/batches/{id}/shipments",
            get(handlers::list_batch_shipments::<R>).post(handlers::add_batch_shipment::<R>),
        )
        .route(
            "/batches/{id}/shipments/{shipment_id}",
            delete(handlers::remove_batch_shipment::<R>),
        )
        .route(
            "/shipments",
            get(handlers::list_shipments::<R>).post(handlers::create_shipment::<R>),
        )
        .route(
            "/shipments/tracking/{tracking}",
            get(handlers::get_shipment_by_tracking::<R>),
        )
        .route(
            "/shipments/{id}",
            get(handlers::get_shipment::<R>)
                .put(handlers::update_shipment::<R>)
                .delete(handlers::delete_shipment::<R>),
        )
        .route(
            "/invoices",
            get(handlers::list_invoices::<R>).post(handlers::create_invoice::<R>),
        )
        .route(
            "/invoices/{id}",
            get(handlers::get_invoice::<R>)
                .put(handlers::update_invoice::<R>)
                .delete(handlers::delete_invoice::<R>),
        )
        .route(
            "/payments",
            get(handlers::list_payments::<R>).post(handlers::create_payment::<R>),
        )
        .route(
            "/payments/{id}",
            get(handlers::get_payment::<R>)
                .put(handlers::update_payment::<R>)
                .delete(handlers::delete_payment::<R>),
        )
        .route(
            "/payments/{id}/shipments",
            get(handlers::list_payment_shipments::<R>).post(handlers::link_payment_shipment::<R>),
        )
        .route(
            "/payments/{id}/shipments/{shipment_id}",
            delete(handlers::unlink_payment_shipment::<R>),
        )
        .route(
            "/pricing-rates",
            get(handlers::list_pricing_rates::<R>).post(handlers::create_pricing_rate::<R>),
        )
        .route("/pricing-rates/quote", get(handlers::quote::<R>))
        .route(
            "/pricing-rates/{id}",
            get(handlers::get_pricing_rate::<R>)
                .put(handlers::update_pricing_rate::<R>)
                .delete(handlers::delete_pricing_rate::<R>),
        )
        .with_state(state)
}
