use chrono::Utc;
use chronos_ledger::{session_status, SessionContext, SessionStatus};
use reqwest::{header::HeaderMap, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::RwLock;

use crate::{api::types::ApiError, config::ClientConfig, state::SessionStore};

/// HTTP access to the Chronos REST store.
///
/// The client carries the signed-in session explicitly; every authenticated
/// call checks it first and a `401` from the store drops it.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: RwLock<Option<SessionContext>>,
    session_store: Option<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::new_with_base_url(config.base_url())
            .with_session_store(SessionStore::new(&config.session_path))
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
            session_store: None,
        }
    }

    pub fn with_session(self, session: SessionContext) -> Self {
        self.set_session(Some(session));
        self
    }

    pub fn with_session_store(mut self, store: SessionStore) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<SessionContext> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }

    pub fn session_store(&self) -> Option<&SessionStore> {
        self.session_store.as_ref()
    }

    pub(crate) fn set_session(&self, session: Option<SessionContext>) {
        if let Ok(mut guard) = self.session.write() {
            *guard = session;
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let session = self.session();
        match session_status(session.as_ref(), Utc::now()) {
            SessionStatus::Valid => {}
            SessionStatus::Expired => {
                self.clear_auth_session();
                return Err(ApiError::unauthorized(
                    "Your session has expired. Please sign in again.",
                ));
            }
            SessionStatus::Missing => {
                return Err(ApiError::signed_out("You are not signed in."));
            }
        }
        let token = session.map(|s| s.token).unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unauthorized("Invalid token format"))?,
        );
        Ok(headers)
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Store rejected credentials; clearing session");
            self.clear_auth_session();
        }
    }

    pub fn clear_auth_session(&self) {
        self.set_session(None);
        if let Some(store) = &self.session_store {
            if let Err(err) = store.clear() {
                tracing::warn!(error = %err, "Failed to remove stored session");
            }
        }
    }

    /// Sends a request without credentials.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "Request did not reach the store");
            ApiError::request_failed(format!("Request failed: {}", e))
        })?;
        self.handle_unauthorized_status(response.status());
        Ok(response)
    }

    pub(crate) async fn send_authorized(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let headers = self.get_auth_headers()?;
        self.send(request.headers(headers)).await
    }

    pub(crate) async fn map_json_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                let mut error =
                    ApiError::invalid_response(format!("Failed to parse response: {}", e));
                error.status = Some(status.as_u16());
                error
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status, &body);
        tracing::debug!(status, code = %error.code, "Store refused request");
        error
    }
}
