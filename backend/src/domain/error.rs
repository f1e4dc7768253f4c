//! Domain-level error type.
//!
//! Transport agnostic: the HTTP inbound adapter maps [`ErrorCode`] values to
//! status codes and renders the JSON envelope. Adapters attach structured
//! details so clients can tell which field or constraint failed.

use serde_json::Value;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed input, failed constraint, or unresolved identifier on the
    /// email path.
    InvalidRequest,
    /// The addressed record does not exist (field-update path).
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// A backing service could not be reached.
    ServiceUnavailable,
    /// Unexpected failure, including rolled-back transactions.
    InternalError,
}

/// Domain error carried from services to inbound adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Supplementary structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_the_expected_code() {
        assert_eq!(Error::invalid_request("x").code(), ErrorCode::InvalidRequest);
        assert_eq!(Error::not_found("x").code(), ErrorCode::NotFound);
        assert_eq!(Error::conflict("x").code(), ErrorCode::Conflict);
        assert_eq!(
            Error::service_unavailable("x").code(),
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(Error::internal("x").code(), ErrorCode::InternalError);
    }

    #[test]
    fn details_are_optional_and_attachable() {
        let bare = Error::invalid_request("missing field");
        assert!(bare.details().is_none());

        let detailed = bare.with_details(json!({ "field": "email" }));
        assert_eq!(detailed.details(), Some(&json!({ "field": "email" })));
        assert_eq!(detailed.message(), "missing field");
    }
}
