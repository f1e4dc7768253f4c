//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the JSON envelope clients expect:
//! `{"message": ..., "error"?: ...}` with a matching status code.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// JSON failure envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub message: String,
    /// Structured diagnostic detail, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.message().to_owned(),
            error: self.details().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codes_map_to_the_expected_statuses() {
        assert_eq!(
            Error::invalid_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            Error::service_unavailable("x").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn envelope_omits_the_error_field_when_there_is_no_detail() {
        let body = ErrorBody {
            message: "nope".into(),
            error: None,
        };
        let rendered = serde_json::to_value(&body).expect("serializes");
        assert_eq!(rendered, json!({ "message": "nope" }));
    }

    #[test]
    fn envelope_carries_diagnostic_detail() {
        let body = ErrorBody {
            message: "failed to update email".into(),
            error: Some(json!({ "error": "audit insert failed" })),
        };
        let rendered = serde_json::to_value(&body).expect("serializes");
        assert_eq!(rendered["error"]["error"], "audit insert failed");
    }
}
