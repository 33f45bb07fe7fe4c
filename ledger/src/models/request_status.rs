//! The closed status set shared by every vacation-request view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationStatus {
    Created,
    Submitted,
    Approved,
    Rejected,
    Revised,
    Resubmitted,
    Cancelled,
    Expired,
}

impl VacationStatus {
    pub const ALL: [VacationStatus; 8] = [
        VacationStatus::Created,
        VacationStatus::Submitted,
        VacationStatus::Approved,
        VacationStatus::Rejected,
        VacationStatus::Revised,
        VacationStatus::Resubmitted,
        VacationStatus::Cancelled,
        VacationStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VacationStatus::Created => "CREATED",
            VacationStatus::Submitted => "SUBMITTED",
            VacationStatus::Approved => "APPROVED",
            VacationStatus::Rejected => "REJECTED",
            VacationStatus::Revised => "REVISED",
            VacationStatus::Resubmitted => "RESUBMITTED",
            VacationStatus::Cancelled => "CANCELLED",
            VacationStatus::Expired => "EXPIRED",
        }
    }

    /// Waiting on an administrator decision.
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self, VacationStatus::Submitted | VacationStatus::Resubmitted)
    }

    /// Decided by an administrator.
    pub fn is_processed(&self) -> bool {
        matches!(self, VacationStatus::Approved | VacationStatus::Rejected)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VacationStatus::Cancelled | VacationStatus::Expired)
    }

    /// Edges of the full lifecycle, including the ones only the backend drives
    /// (revision, resubmission, expiry).
    pub fn can_transition_to(&self, next: VacationStatus) -> bool {
        use VacationStatus::*;
        if next == Cancelled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Created, Submitted)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (Submitted, Expired)
                | (Approved, Revised)
                | (Rejected, Revised)
                | (Revised, Resubmitted)
                | (Resubmitted, Approved)
                | (Resubmitted, Rejected)
        )
    }
}

impl fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vacation status `{}`", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for VacationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        VacationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
