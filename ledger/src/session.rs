//! Explicit identity context for the signed-in user.
//!
//! The expiry check is a UX convenience; the store enforces authentication on
//! every call.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerError;
use crate::lifecycle::Actor;
use crate::models::UserRole;
use crate::types::{CompanyId, UserId};

/// Window before expiry in which the session counts as "expiring soon".
pub const EXPIRY_WARNING_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Valid,
    Expired,
    Missing,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Valid => f.write_str("valid"),
            SessionStatus::Expired => f.write_str("expired"),
            SessionStatus::Missing => f.write_str("missing"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: UserId,
    pub role: UserRole,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &mask_token(&self.token))
            .field("expires_at", &self.expires_at)
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("company_id", &self.company_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish()
    }
}

impl SessionContext {
    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        if self.token.trim().is_empty() {
            SessionStatus::Missing
        } else if now >= self.expires_at {
            SessionStatus::Expired
        } else {
            SessionStatus::Valid
        }
    }

    /// True only while the session is still valid but inside the warning window.
    pub fn expires_soon(&self, now: DateTime<Utc>) -> bool {
        let left = self.expires_at - now;
        left > Duration::zero() && left < Duration::seconds(EXPIRY_WARNING_SECS)
    }

    pub fn actor(&self) -> Actor {
        Actor::from(self.role)
    }

    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), LedgerError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(LedgerError::NotPermitted(format!(
                "Role {} may not access this view",
                self.role
            )))
        }
    }
}

/// Typed replacement for an "is the token expired" boolean.
pub fn session_status(session: Option<&SessionContext>, now: DateTime<Utc>) -> SessionStatus {
    match session {
        Some(session) => session.status(now),
        None => SessionStatus::Missing,
    }
}

pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "<empty>".into();
    }
    let prefix = token.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, token.len())
}
