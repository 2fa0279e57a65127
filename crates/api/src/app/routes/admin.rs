//! Admin routes for principal management.
//!
//! All three endpoints are admin-gated; the delete endpoint additionally
//! refuses self-deletion. The admin check runs first, so a non-admin
//! attempting self-delete sees 403, not 400.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};

use ledgerkeep_core::PrincipalId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/:id", delete(delete_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    match services.create_user(principal.principal(), &body.email, &body.password) {
        Ok(created) => (
            StatusCode::CREATED,
            Json(dto::UserResponse::from(created)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.list_users(principal.principal()) {
        Ok(users) => {
            let items: Vec<dto::UserResponse> = users.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let target: PrincipalId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id")
        }
    };

    match services.delete_user(principal.principal(), target) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "user deleted" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
