//! Login: credentials in, session token out.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, errors, services::AppServices};

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let outcome = match services.login(&body.email, &body.password) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(dto::TokenResponse {
            access_token: outcome.token,
            token_type: "bearer",
            is_admin: outcome.is_admin,
        }),
    )
        .into_response()
}
