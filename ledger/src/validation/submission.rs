use chrono::NaiveDate;
use validator::Validate;

use super::rules::{validate_date_order, validate_not_retroactive};
use crate::error::LedgerError;
use crate::models::{NewVacationRequest, VacationBalance};

/// Runs the full pre-flight check for a new request and returns the number of
/// working days it would charge.
///
/// `today` must be evaluated at submission time, not when the form was drawn.
pub fn validate_submission(
    draft: &NewVacationRequest,
    balance: &VacationBalance,
    today: NaiveDate,
) -> Result<u32, LedgerError> {
    draft.validate()?;

    if validate_date_order(draft.start_date, draft.end_date).is_err() {
        return Err(LedgerError::InvalidRange {
            start: draft.start_date,
            end: draft.end_date,
        });
    }

    if validate_not_retroactive(draft.start_date, today).is_err() {
        return Err(LedgerError::RetroactiveStart {
            start: draft.start_date,
            today,
        });
    }

    let days = draft.working_days();
    if days < 1 {
        return Err(LedgerError::NoWorkingDays);
    }

    balance.ensure_covers(days)?;

    tracing::debug!(
        employee_id = %draft.employee_id,
        start = %draft.start_date,
        end = %draft.end_date,
        days,
        remaining = balance.remaining(),
        "vacation submission passed pre-flight checks"
    );
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(start: NaiveDate, end: NaiveDate) -> NewVacationRequest {
        NewVacationRequest {
            employee_id: UserId::new(3),
            administrator_id: UserId::new(1),
            start_date: start,
            end_date: end,
        }
    }

    fn balance(remaining: i64) -> VacationBalance {
        VacationBalance::new(21, remaining).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 11, 28)
    }

    #[test]
    fn accepts_week_within_balance() {
        let days = validate_submission(
            &draft(date(2024, 12, 2), date(2024, 12, 6)),
            &balance(5),
            today(),
        )
        .unwrap();
        assert_eq!(days, 5);
    }

    #[test]
    fn rejects_weekend_only_range() {
        let err = validate_submission(
            &draft(date(2024, 12, 7), date(2024, 12, 8)),
            &balance(5),
            today(),
        )
        .unwrap_err();
        assert_eq!(err, LedgerError::NoWorkingDays);
    }

    #[test]
    fn rejects_inverted_range_before_counting() {
        let err = validate_submission(
            &draft(date(2024, 12, 6), date(2024, 12, 2)),
            &balance(5),
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_start_before_today() {
        let err = validate_submission(
            &draft(date(2024, 11, 27), date(2024, 12, 2)),
            &balance(5),
            today(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LedgerError::RetroactiveStart {
                start: date(2024, 11, 27),
                today: today()
            }
        );
    }

    #[test]
    fn accepts_start_today() {
        assert!(validate_submission(&draft(today(), today()), &balance(5), today()).is_ok());
    }

    #[test]
    fn surfaces_shortfall_when_balance_too_small() {
        let err = validate_submission(
            &draft(date(2024, 12, 2), date(2024, 12, 6)),
            &balance(3),
            today(),
        )
        .unwrap_err();
        assert_eq!(err.shortfall(), Some((5, 3)));
    }

    #[test]
    fn rejects_unassigned_administrator() {
        let mut payload = draft(date(2024, 12, 2), date(2024, 12, 6));
        payload.administrator_id = UserId::new(0);
        let err = validate_submission(&payload, &balance(5), today()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Validation(vec!["administrator_id: user_id_required".into()])
        );
    }
}
