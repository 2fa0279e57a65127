use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ledgerkeep_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        DomainError::Forbidden => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "admin access required",
        ),
        DomainError::InvalidOperation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_operation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::DuplicateEmail => json_error(
            StatusCode::BAD_REQUEST,
            "duplicate_email",
            "email already registered",
        ),
        DomainError::DuplicateCustomer => json_error(
            StatusCode::BAD_REQUEST,
            "duplicate_customer",
            "customer with this contact info already exists",
        ),
        DomainError::UnknownCustomer => json_error(
            StatusCode::NOT_FOUND,
            "unknown_customer",
            "customer not found",
        ),
        DomainError::CorruptCredential => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "corrupt_credential",
            "stored credential is corrupt",
        ),
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::StorageUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
