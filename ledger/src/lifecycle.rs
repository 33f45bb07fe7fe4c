//! Client-side view of the vacation-request state machine.
//!
//! The full lifecycle (revision, resubmission, expiry) lives on
//! [`VacationStatus::can_transition_to`]; this module only knows the actions a
//! client may initiate and the guards that run before each one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerError;
use crate::models::{StatusUpdate, UserRole, VacationBalance, VacationRequest, VacationStatus};
use crate::types::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Employee,
    Administrator,
}

impl From<UserRole> for Actor {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Employee => Actor::Employee,
            UserRole::Administrator | UserRole::SuperAdmin => Actor::Administrator,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Employee => f.write_str("employee"),
            Actor::Administrator => f.write_str("administrator"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Submit,
    Approve,
    Reject,
    Cancel,
}

impl Action {
    pub fn target(&self) -> VacationStatus {
        match self {
            Action::Submit => VacationStatus::Submitted,
            Action::Approve => VacationStatus::Approved,
            Action::Reject => VacationStatus::Rejected,
            Action::Cancel => VacationStatus::Cancelled,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Submit => "submit",
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::Cancel => "cancel",
        };
        f.write_str(label)
    }
}

/// Resolves a client action against the current state.
///
/// `from` is `None` for a request that does not exist yet.
pub fn transition(
    from: Option<VacationStatus>,
    actor: Actor,
    action: Action,
) -> Result<VacationStatus, LedgerError> {
    let allowed = match (from, actor, action) {
        (None, Actor::Employee, Action::Submit) => true,
        (Some(status), Actor::Administrator, Action::Approve | Action::Reject) => {
            status.is_awaiting_decision()
        }
        (Some(status), Actor::Employee, Action::Cancel) => status.is_awaiting_decision(),
        _ => false,
    };

    if !allowed {
        return Err(LedgerError::InvalidTransition {
            from,
            actor,
            action,
        });
    }

    let target = action.target();
    debug_assert!(from.map_or(true, |status| status.can_transition_to(target)));
    Ok(target)
}

/// Outcome of a successful approval pre-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approval {
    pub update: StatusUpdate,
    pub days: u32,
    /// What the balance should read once the store applies the decrement.
    pub projected_balance: VacationBalance,
}

/// Checks that `decider` may act on `request` at all.
pub fn ensure_can_decide(
    request: &VacationRequest,
    decider: UserId,
    role: UserRole,
) -> Result<(), LedgerError> {
    match role {
        UserRole::SuperAdmin => Ok(()),
        UserRole::Administrator if request.administrator_id == decider => Ok(()),
        UserRole::Administrator => Err(LedgerError::NotPermitted(format!(
            "Request {} is assigned to another administrator",
            request.id
        ))),
        UserRole::Employee => Err(LedgerError::NotPermitted(
            "Only administrators can decide on vacation requests".to_string(),
        )),
    }
}

/// Approval guard: the employee's remaining days must cover the request.
///
/// On failure nothing about the request or the balance changes.
pub fn approve(
    request: &VacationRequest,
    balance: &VacationBalance,
) -> Result<Approval, LedgerError> {
    let status = transition(Some(request.status), Actor::Administrator, Action::Approve)?;
    let days = request.working_days();
    let projected_balance = balance.debit(days)?;
    Ok(Approval {
        update: StatusUpdate { status },
        days,
        projected_balance,
    })
}

/// Rejection needs no balance; the store leaves it untouched.
pub fn reject(request: &VacationRequest) -> Result<StatusUpdate, LedgerError> {
    let status = transition(Some(request.status), Actor::Administrator, Action::Reject)?;
    Ok(StatusUpdate { status })
}

/// Employees may only withdraw their own requests.
pub fn cancel(request: &VacationRequest, requester: UserId) -> Result<StatusUpdate, LedgerError> {
    if request.employee_id != requester {
        return Err(LedgerError::NotPermitted(format!(
            "Request {} belongs to another employee",
            request.id
        )));
    }
    let status = transition(Some(request.status), Actor::Employee, Action::Cancel)?;
    Ok(StatusUpdate { status })
}
