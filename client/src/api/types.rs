use chronos_ledger::{CompanyId, UserId, UserRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body returned by `POST /auth/login`.
///
/// Older backends only send the token and profile strings; identity and
/// expiry are then recovered from `/users/email/{email}` and the token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default, alias = "id")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// How a failure should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any request was sent.
    Validation,
    /// The store answered and refused.
    Conflict,
    /// The store no longer accepts our credentials.
    Unauthorized,
    /// The store could not be reached or failed on its side.
    Transient,
    /// The client itself failed, e.g. writing local state.
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
            status: None,
        }
    }

    /// The store answered but the client could not make sense of the answer.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "INVALID_RESPONSE".to_string(),
            details: None,
            status: None,
        }
    }

    /// Something on this machine failed after the store had answered.
    pub fn local(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "LOCAL_FAILURE".to_string(),
            details: None,
            status: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
            status: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
            status: None,
        }
    }

    pub fn signed_out(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "SESSION_MISSING".to_string(),
            details: None,
            status: None,
        }
    }

    /// True when no session was present at all, as opposed to one that lapsed.
    pub fn is_signed_out(&self) -> bool {
        self.code == "SESSION_MISSING"
    }

    /// Builds an error from a non-success response body, keeping the store's
    /// own message verbatim when it sent one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|value| {
                // Spring bodies carry the reason phrase in `error` and the
                // application message in `message`.
                ["message", "error", "detail"].iter().find_map(|key| {
                    value
                        .get(*key)
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                })
            })
            .map(str::to_string)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && parsed.is_none()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| default_message(status));
        let code = parsed
            .as_ref()
            .and_then(|value| value.get("code").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| default_code(status).to_string());
        let details = parsed.as_ref().and_then(|value| value.get("details").cloned());

        Self {
            error: message,
            code,
            details,
            status: Some(status),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match (self.status, self.code.as_str()) {
            (_, "LOCAL_FAILURE") => ErrorKind::Local,
            (Some(401), _) | (None, "UNAUTHORIZED" | "SESSION_MISSING") => ErrorKind::Unauthorized,
            (_, "INVALID_RESPONSE") => ErrorKind::Conflict,
            (Some(status), _) if status >= 500 => ErrorKind::Transient,
            (Some(_), _) => ErrorKind::Conflict,
            (None, "VALIDATION_ERROR") => ErrorKind::Validation,
            (None, _) => ErrorKind::Transient,
        }
    }
}

fn default_code(status: u16) -> &'static str {
    match status {
        400 => "BAD_REQUEST",
        401 => "UNAUTHORIZED",
        403 => "FORBIDDEN",
        404 => "NOT_FOUND",
        409 => "CONFLICT",
        422 => "UNPROCESSABLE_ENTITY",
        s if s >= 500 => "INTERNAL_SERVER_ERROR",
        _ => "REQUEST_REJECTED",
    }
}

fn default_message(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_helpers_set_expected_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());
        assert_eq!(validation.kind(), ErrorKind::Validation);

        let invalid = ApiError::invalid_response("Failed to parse response: eof");
        assert_eq!(invalid.code, "INVALID_RESPONSE");

        let request_failed = ApiError::request_failed("network error");
        assert_eq!(request_failed.code, "REQUEST_FAILED");
        assert_eq!(request_failed.kind(), ErrorKind::Transient);
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::local("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn from_response_keeps_store_message_verbatim() {
        let error = ApiError::from_response(
            409,
            r#"{"message":"Vacation request is no longer pending"}"#,
        );
        assert_eq!(error.error, "Vacation request is no longer pending");
        assert_eq!(error.code, "CONFLICT");
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn from_response_reads_backend_error_shape() {
        let error = ApiError::from_response(
            400,
            r#"{"error":"Validation failed","code":"VALIDATION_ERROR","details":{"errors":["x"]}}"#,
        );
        assert_eq!(error.error, "Validation failed");
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.as_ref().unwrap()["errors"][0], "x");
        // Came from the store, so it is a remote refusal, not a local one.
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn from_response_prefers_spring_message_over_reason_phrase() {
        let error = ApiError::from_response(
            409,
            r#"{"timestamp":"2024-12-02T10:00:00.000+00:00","status":409,"error":"Conflict","message":"Vacation request is no longer pending","path":"/api/vacation-requests/5/status"}"#,
        );
        assert_eq!(error.error, "Vacation request is no longer pending");
        assert_eq!(error.kind(), ErrorKind::Conflict);

        // Spring hides the message by default; fall back to the reason phrase.
        let error = ApiError::from_response(
            400,
            r#"{"status":400,"error":"Bad Request","message":"","path":"/api/vacation-requests"}"#,
        );
        assert_eq!(error.error, "Bad Request");
    }

    #[test]
    fn answered_but_unusable_responses_are_not_transient() {
        assert_eq!(
            ApiError::invalid_response("Failed to parse response: eof").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            ApiError::local("could not write session").kind(),
            ErrorKind::Local
        );
    }

    #[test]
    fn missing_session_is_distinguishable_from_expired() {
        let missing = ApiError::signed_out("You are not signed in.");
        assert_eq!(missing.kind(), ErrorKind::Unauthorized);
        assert!(missing.is_signed_out());
        assert!(!ApiError::unauthorized("Session expired").is_signed_out());
    }

    #[test]
    fn from_response_falls_back_to_plain_text_and_reason() {
        let error = ApiError::from_response(422, "Overlapping request exists");
        assert_eq!(error.error, "Overlapping request exists");

        let error = ApiError::from_response(503, "");
        assert_eq!(error.error, "Service Unavailable");
        assert_eq!(error.kind(), ErrorKind::Transient);
    }

    #[test]
    fn unauthorized_status_classifies_as_session_problem() {
        assert_eq!(
            ApiError::from_response(401, "{}").kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            ApiError::unauthorized("Session expired").kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn deserialize_login_response_without_identity() {
        let raw = r#"{"token":"abc","email":"ana@example.com","name":"Ana","role":"EMPLOYEE"}"#;
        let response: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.role, Some(UserRole::Employee));
        assert!(response.user_id.is_none());
        assert!(response.expires_at.is_none());
    }

    #[test]
    fn login_request_debug_redacts_password() {
        let request = LoginRequest {
            email: "ana@example.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }
}
