//! Typed ID wrappers for compile-time type safety.
//!
//! The store hands out numeric identifiers. These types keep a request id
//! from being passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw numeric value used on the wire.
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Store-assigned ids are strictly positive.
            pub const fn is_assigned(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(VacationRequestId, "Identifier of a vacation request.");
typed_id!(UserId, "Identifier of a user (employee, administrator or super-admin).");
typed_id!(CompanyId, "Identifier of a company.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_id_serializes_as_bare_number() {
        let id = UserId::new(42);
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(42));
        let back: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn typed_id_parses_from_str() {
        let id: VacationRequestId = " 7 ".parse().unwrap();
        assert_eq!(id.get(), 7);
        assert!("seven".parse::<VacationRequestId>().is_err());
    }

    #[test]
    fn typed_id_assignment_requires_positive_value() {
        assert!(CompanyId::new(1).is_assigned());
        assert!(!CompanyId::new(0).is_assigned());
        assert!(!CompanyId::new(-3).is_assigned());
    }
}
