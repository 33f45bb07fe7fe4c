use chrono::NaiveDate;
use thiserror::Error;

use crate::lifecycle::{Action, Actor};
use crate::models::VacationStatus;
use crate::types::UserId;

/// Errors raised by the ledger before anything is sent to the store.
///
/// Every variant is a local, pre-flight refusal: when one of these is
/// returned no mutation has been issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("End date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Vacation cannot start in the past ({start} is before {today})")]
    RetroactiveStart { start: NaiveDate, today: NaiveDate },

    #[error("A vacation request must cover at least 1 working day")]
    NoWorkingDays,

    #[error("Insufficient vacation days: requested {requested}, available {available}")]
    InsufficientDays { requested: u32, available: u32 },

    #[error("No vacation balance on record for user {0}")]
    NoBalance(UserId),

    #[error("Inconsistent vacation balance: {remaining} remaining of {total}")]
    InconsistentBalance { total: i64, remaining: i64 },

    #[error("{actor} cannot {action} a request that is {}", state_label(.from))]
    InvalidTransition {
        from: Option<VacationStatus>,
        actor: Actor,
        action: Action,
    },

    #[error("{0}")]
    NotPermitted(String),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

impl LedgerError {
    /// Shortfall carried by an insufficient-days refusal, as `(requested, available)`.
    pub fn shortfall(&self) -> Option<(u32, u32)> {
        match self {
            LedgerError::InsufficientDays {
                requested,
                available,
            } => Some((*requested, *available)),
            _ => None,
        }
    }
}

fn state_label(status: &Option<VacationStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "not yet created".to_string(),
    }
}

impl From<validator::ValidationErrors> for LedgerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        messages.sort();
        LedgerError::Validation(messages)
    }
}
