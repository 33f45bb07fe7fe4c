use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use chronos_ledger::{session::mask_token, SessionContext, UserId, UserRole};
use serde_json::Value;

use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse},
};

impl ApiClient {
    /// Signs in and installs the resulting session on this client.
    ///
    /// The session is also persisted when the client has a session store.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionContext, ApiError> {
        tracing::info!(email = %request.email, "Signing in");
        let url = self.endpoint("/auth/login");
        let response = self.send(self.http().post(url).json(&request)).await?;
        let login: LoginResponse = self.map_json_response(response).await?;

        let session = self.establish_session(login, &request.email).await?;
        if let Some(store) = self.session_store() {
            store.save(&session).map_err(|e| {
                ApiError::local(format!("Signed in but could not store the session: {}", e))
            })?;
        }
        tracing::info!(
            user_id = %session.user_id,
            role = %session.role,
            token = %mask_token(&session.token),
            expires_at = %session.expires_at,
            "Signed in"
        );
        Ok(session)
    }

    pub fn logout(&self) {
        self.clear_auth_session();
        tracing::info!("Signed out");
    }

    async fn establish_session(
        &self,
        login: LoginResponse,
        fallback_email: &str,
    ) -> Result<SessionContext, ApiError> {
        let expires_at = login
            .expires_at
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .or_else(|| token_expiry(&login.token))
            .ok_or_else(|| ApiError::invalid_response("Login response did not include a session expiry"))?;
        let email = login
            .email
            .clone()
            .unwrap_or_else(|| fallback_email.trim().to_string());

        let mut session = SessionContext {
            token: login.token,
            expires_at,
            user_id: login.user_id.unwrap_or(UserId::new(0)),
            role: login.role.unwrap_or(UserRole::Employee),
            company_id: login.company_id,
            name: login.name,
            email: Some(email.clone()),
        };

        if login.user_id.is_none() || login.role.is_none() {
            // The lookup itself needs the bearer token.
            self.set_session(Some(session.clone()));
            let user = match self.get_user_by_email(&email).await {
                Ok(user) => user,
                Err(err) => {
                    self.set_session(None);
                    return Err(err);
                }
            };
            session.user_id = user.id;
            session.role = user.user_type;
            session.company_id = session.company_id.or_else(|| user.company_id());
            if session.name.is_none() {
                session.name = Some(user.display_name().to_string());
            }
        }

        self.set_session(Some(session.clone()));
        Ok(session)
    }
}

/// Reads the `exp` claim of a JWT without verifying it.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}
