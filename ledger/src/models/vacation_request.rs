use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::request_status::VacationStatus;
use crate::types::{UserId, VacationRequestId};
use crate::utils::working_days::count_working_days;
use crate::validation::rules::validate_assigned_user;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequest {
    pub id: VacationRequestId,
    pub employee_id: UserId,
    pub administrator_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VacationStatus,
    #[serde(default)]
    pub pdf_path: Option<String>,
}

impl VacationRequest {
    /// Working days this request charges against the employee's balance.
    pub fn working_days(&self) -> u32 {
        count_working_days(self.start_date, self.end_date)
    }

    /// Approval document reference. Only meaningful once approved.
    pub fn approval_document(&self) -> Option<&str> {
        match self.status {
            VacationStatus::Approved => self.pdf_path.as_deref(),
            _ => None,
        }
    }

    pub fn is_awaiting_decision(&self) -> bool {
        self.status.is_awaiting_decision()
    }
}

/// Body of `POST /vacation-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVacationRequest {
    #[validate(custom(function = "validate_assigned_user"))]
    pub employee_id: UserId,
    #[validate(custom(function = "validate_assigned_user"))]
    pub administrator_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewVacationRequest {
    pub fn working_days(&self) -> u32 {
        count_working_days(self.start_date, self.end_date)
    }
}

/// Body of `PUT /vacation-requests/{id}/status`.
///
/// Only the target status travels; balance arithmetic stays with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: VacationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn deserialize_vacation_request_camel_case() {
        let raw = serde_json::json!({
            "id": 11,
            "employeeId": 3,
            "administratorId": 1,
            "startDate": "2024-12-02",
            "endDate": "2024-12-06",
            "status": "SUBMITTED",
            "pdfPath": null
        });
        let request: VacationRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.id, VacationRequestId::new(11));
        assert_eq!(request.employee_id, UserId::new(3));
        assert_eq!(request.start_date, date(2024, 12, 2));
        assert_eq!(request.working_days(), 5);
        assert!(request.is_awaiting_decision());
    }

    #[test]
    fn deserialize_tolerates_missing_pdf_path() {
        let raw = serde_json::json!({
            "id": 1,
            "employeeId": 3,
            "administratorId": 1,
            "startDate": "2024-12-02",
            "endDate": "2024-12-02",
            "status": "APPROVED"
        });
        let request: VacationRequest = serde_json::from_value(raw).unwrap();
        assert!(request.pdf_path.is_none());
        assert!(request.approval_document().is_none());
    }

    #[test]
    fn approval_document_hidden_until_approved() {
        let mut request = VacationRequest {
            id: VacationRequestId::new(1),
            employee_id: UserId::new(3),
            administrator_id: UserId::new(1),
            start_date: date(2024, 12, 2),
            end_date: date(2024, 12, 2),
            status: VacationStatus::Rejected,
            pdf_path: Some("/docs/1.pdf".into()),
        };
        assert!(request.approval_document().is_none());
        request.status = VacationStatus::Approved;
        assert_eq!(request.approval_document(), Some("/docs/1.pdf"));
    }

    #[test]
    fn serialize_new_request_uses_iso_dates() {
        let payload = NewVacationRequest {
            employee_id: UserId::new(3),
            administrator_id: UserId::new(1),
            start_date: date(2025, 1, 2),
            end_date: date(2025, 1, 3),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["employeeId"], serde_json::json!(3));
        assert_eq!(value["administratorId"], serde_json::json!(1));
        assert_eq!(value["startDate"], serde_json::json!("2025-01-02"));
        assert_eq!(value["endDate"], serde_json::json!("2025-01-03"));
    }

    #[test]
    fn new_request_requires_assigned_ids() {
        let payload = NewVacationRequest {
            employee_id: UserId::new(0),
            administrator_id: UserId::new(1),
            start_date: date(2025, 1, 2),
            end_date: date(2025, 1, 3),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("employee_id"));
        assert!(!errors.field_errors().contains_key("administrator_id"));
    }

    #[test]
    fn status_update_body_carries_only_status() {
        let body = StatusUpdate {
            status: VacationStatus::Approved,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "status": "APPROVED" })
        );
    }
}
