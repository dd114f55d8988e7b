use crate::request::{HttpResponse, TransportError};
use std::fmt;

/// Last step of the message fallback chain.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

// =========================================================
// 错误状态枚举
// =========================================================

/// What went wrong, as far as a view needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorStatus {
    /// Rejected on the client before any request was sent.
    Validation,
    /// 401 / 403
    Unauthorized,
    /// 404
    NotFound,
    /// 400
    BadRequest,
    /// 409: duplicate review, full room, ...
    Conflict,
    /// Any other non-2xx status.
    Server,
    /// No HTTP response at all.
    Transport,
    /// 2xx, but the body did not match the expected shape.
    Decode,
}

impl ApiErrorStatus {
    pub fn from_status_code(code: u16) -> Self {
        match code {
            400 => ApiErrorStatus::BadRequest,
            401 | 403 => ApiErrorStatus::Unauthorized,
            404 => ApiErrorStatus::NotFound,
            409 => ApiErrorStatus::Conflict,
            _ => ApiErrorStatus::Server,
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// The single error shape every gateway call produces.
///
/// `message` is always human readable; call sites never look at raw transport
/// details.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: ApiErrorStatus,
    pub message: String,
    /// HTTP status code, when a response was received.
    pub http_status: Option<u16>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: ApiErrorStatus, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: if message.trim().is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            http_status: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Validation, message)
    }

    /// Normalizes a non-2xx response: server message, then a generic status
    /// message.
    pub fn from_response(res: &HttpResponse) -> Self {
        let message = server_message(&res.body)
            .unwrap_or_else(|| format!("Request failed with status {}", res.status));
        Self {
            http_status: Some(res.status),
            ..Self::new(ApiErrorStatus::from_status_code(res.status), message)
        }
    }

    /// Normalizes a transport failure: the transport's own text, then the default.
    pub fn from_transport(err: &TransportError) -> Self {
        Self::new(ApiErrorStatus::Transport, err.0.clone())
    }

    pub fn from_decode(err: &serde_json::Error) -> Self {
        Self::new(
            ApiErrorStatus::Decode,
            format!("Unexpected response from server: {err}"),
        )
    }

    pub fn is_conflict(&self) -> bool {
        self.status == ApiErrorStatus::Conflict
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == ApiErrorStatus::Unauthorized
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(&err)
    }
}

impl fmt::Display for ApiErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiErrorStatus::Validation => "validation",
            ApiErrorStatus::Unauthorized => "unauthorized",
            ApiErrorStatus::NotFound => "not_found",
            ApiErrorStatus::BadRequest => "bad_request",
            ApiErrorStatus::Conflict => "conflict",
            ApiErrorStatus::Server => "server",
            ApiErrorStatus::Transport => "transport",
            ApiErrorStatus::Decode => "decode",
        };
        f.write_str(s)
    }
}

/// Extracts the server-provided message from an error body.
///
/// The identity service answers `{"error": "..."}`, some handlers answer
/// `{"message": "..."}`, and the Go `http.Error` helpers answer plain text.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => ["error", "message"]
            .iter()
            .filter_map(|key| map.get(*key))
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn server_json_error_field_wins() {
        let err = ApiError::from_response(&res(401, r#"{"error":"invalid credentials"}"#));
        assert_eq!(err.message, "invalid credentials");
        assert_eq!(err.status, ApiErrorStatus::Unauthorized);
        assert_eq!(err.http_status, Some(401));
    }

    #[test]
    fn message_field_is_used_when_error_is_missing() {
        let err = ApiError::from_response(&res(400, r#"{"message":"ocena mora biti 1-5"}"#));
        assert_eq!(err.message, "ocena mora biti 1-5");
        assert_eq!(err.status, ApiErrorStatus::BadRequest);
    }

    #[test]
    fn plain_text_bodies_are_server_messages() {
        let err = ApiError::from_response(&res(409, "soba je popunjena\n"));
        assert_eq!(err.message, "soba je popunjena");
        assert!(err.is_conflict());
    }

    #[test]
    fn falls_back_to_generic_status_message() {
        let err = ApiError::from_response(&res(500, ""));
        assert_eq!(err.message, "Request failed with status 500");
        let err = ApiError::from_response(&res(502, r#"{"error":""}"#));
        assert_eq!(err.message, "Request failed with status 502");
        assert_eq!(err.status, ApiErrorStatus::Server);
    }

    #[test]
    fn transport_errors_fall_back_to_default() {
        let err = ApiError::from(TransportError("connection refused".into()));
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.http_status, None);

        let err = ApiError::from(TransportError("   ".into()));
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.status, ApiErrorStatus::Transport);
    }

    #[test]
    fn forbidden_counts_as_unauthorized() {
        assert!(ApiError::from_response(&res(403, "")).is_unauthorized());
    }
}
