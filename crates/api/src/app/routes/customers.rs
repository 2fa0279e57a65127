use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use ledgerkeep_core::CustomerId;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/search", get(search_customers))
        .route("/:id", put(update_customer))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_customers() {
        Ok(items) => {
            let items: Vec<dto::CustomerResponse> = items
                .into_iter()
                .map(|(customer, txs)| dto::CustomerResponse::new(customer, txs))
                .collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    match services.create_customer(body.into()) {
        Ok(customer) => (
            StatusCode::CREATED,
            Json(dto::CustomerResponse::new(customer, Vec::new())),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid customer id",
            )
        }
    };

    match services.update_customer(id, body.into()) {
        Ok(customer) => {
            // The update path re-serves the customer with their transactions.
            let txs = match services.list_transactions_for(customer.id) {
                Ok(txs) => txs,
                Err(e) => return errors::domain_error_to_response(e),
            };
            (
                StatusCode::OK,
                Json(dto::CustomerResponse::new(customer, txs)),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchQuery>,
) -> axum::response::Response {
    match services.search_customers(&params.query) {
        Ok(rows) => {
            let items: Vec<dto::BalanceResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
