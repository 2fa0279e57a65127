use axum::Router;

pub mod admin;
pub mod auth;
pub mod customers;
pub mod system;
pub mod transactions;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/admin/users", admin::router())
        .nest("/customers", customers::router())
        .nest("/transactions", transactions::router())
}
