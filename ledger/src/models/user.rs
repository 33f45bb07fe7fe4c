use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerError;
use crate::types::{CompanyId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
    #[serde(rename = "ADMINISTRATOR")]
    Administrator,
    #[serde(rename = "EMPLOYEE")]
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPERADMIN",
            UserRole::Administrator => "ADMINISTRATOR",
            UserRole::Employee => "EMPLOYEE",
        }
    }

    /// Roles allowed to decide on vacation requests.
    pub fn can_decide(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::Administrator)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPERADMIN" => Ok(UserRole::SuperAdmin),
            "ADMINISTRATOR" => Ok(UserRole::Administrator),
            "EMPLOYEE" => Ok(UserRole::Employee),
            other => Err(LedgerError::Validation(vec![format!(
                "role: unknown role `{}`",
                other
            )])),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub user_type: UserRole,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub vacation_days_total: Option<i64>,
    #[serde(default)]
    pub vacation_days_remaining: Option<i64>,
    #[serde(default)]
    pub expected_workload: Option<f64>,
    #[serde(default)]
    pub administrator_id: Option<UserId>,
}

impl User {
    /// Reads the balance attributes, enforcing `0 <= remaining <= total`.
    pub fn vacation_balance(&self) -> Result<VacationBalance, LedgerError> {
        match (self.vacation_days_total, self.vacation_days_remaining) {
            (Some(total), Some(remaining)) => VacationBalance::new(total, remaining),
            _ => Err(LedgerError::NoBalance(self.id)),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company.as_ref().map(|company| company.id)
    }
}

/// An employee's vacation entitlement as last reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBalance {
    total: u32,
    remaining: u32,
}

impl VacationBalance {
    pub fn new(total: i64, remaining: i64) -> Result<Self, LedgerError> {
        if total < 0 || remaining < 0 || remaining > total || total > i64::from(u32::MAX) {
            return Err(LedgerError::InconsistentBalance { total, remaining });
        }
        Ok(Self {
            total: total as u32,
            remaining: remaining as u32,
        })
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn days_used(&self) -> u32 {
        self.total - self.remaining
    }

    pub fn covers(&self, days: u32) -> bool {
        self.remaining >= days
    }

    /// Ensures `days` fit in what is left.
    pub fn ensure_covers(&self, days: u32) -> Result<(), LedgerError> {
        if self.covers(days) {
            Ok(())
        } else {
            Err(LedgerError::InsufficientDays {
                requested: days,
                available: self.remaining,
            })
        }
    }

    /// Local projection of the balance after an approval of `days`.
    ///
    /// The store performs the real decrement; this value only feeds the view
    /// until the next fetch replaces it.
    pub fn debit(&self, days: u32) -> Result<Self, LedgerError> {
        self.ensure_covers(days)?;
        Ok(Self {
            total: self.total,
            remaining: self.remaining - days,
        })
    }
}

impl fmt::Display for VacationBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} days", self.remaining, self.total)
    }
}
