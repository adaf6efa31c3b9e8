//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Service info
//! GET  /health                        - Liveness
//! GET  /health/ready                  - Readiness (database reachable)
//!
//! # Customers
//! GET  /api/customers/                - Paged customers with order counts
//! GET  /api/customers/{id}            - Customer detail with embedded orders
//! GET  /api/customers/{id}/orders     - Paged, filtered orders with totals
//!
//! # Orders
//! GET  /api/orders/{id}               - Order detail with customer and items
//! ```

pub mod customers;
pub mod home;
pub mod orders;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::list))
        .route("/customers/", get(customers::list))
        .route("/customers/{id}", get(customers::show))
        .route("/customers/{id}/orders", get(customers::orders))
        .route("/orders/{id}", get(orders::show))
}

/// Create the main router with all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .nest("/api", api_routes())
}
