use chrono::NaiveDate;
use chronos_ledger::{
    count_working_days, lifecycle, validate_submission, LedgerError, NewVacationRequest,
    Placement, RequestBoard, UserId, VacationBalance, VacationRequest, VacationRequestId,
    VacationStatus,
};

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

fn stored(id: i64, payload: &NewVacationRequest) -> VacationRequest {
    VacationRequest {
        id: VacationRequestId::new(id),
        employee_id: payload.employee_id,
        administrator_id: payload.administrator_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: VacationStatus::Submitted,
        pdf_path: None,
    }
}

#[test]
fn full_week_exhausts_balance_then_single_day_is_refused() {
    let today = date(2024, 11, 29);
    let mut balance = VacationBalance::new(21, 5).unwrap();
    let mut board = RequestBoard::default();

    let week = draft(date(2024, 12, 2), date(2024, 12, 6));
    assert_eq!(validate_submission(&week, &balance, today).unwrap(), 5);
    let first = stored(1, &week);
    board.replace_all(vec![first.clone()]);

    let approval = lifecycle::approve(&first, &balance).unwrap();
    assert_eq!(approval.days, 5);
    let mut approved = first.clone();
    approved.status = approval.update.status;
    assert_eq!(board.apply_update(approved), Placement::Processed);
    balance = approval.projected_balance;
    assert_eq!(balance.remaining(), 0);

    let monday = draft(date(2024, 12, 9), date(2024, 12, 9));
    assert_eq!(
        validate_submission(&monday, &balance, today),
        Err(LedgerError::InsufficientDays {
            requested: 1,
            available: 0
        })
    );

    // Even if the store accepted it, approval must refuse without touching state.
    let second = stored(2, &monday);
    board.apply_update(second.clone());
    let before = board.clone();
    assert_eq!(
        lifecycle::approve(&second, &balance),
        Err(LedgerError::InsufficientDays {
            requested: 1,
            available: 0
        })
    );
    assert_eq!(board, before);
    assert_eq!(balance.remaining(), 0);
}

#[test]
fn weekend_request_is_refused_locally() {
    let err = validate_submission(
        &draft(date(2024, 12, 7), date(2024, 12, 8)),
        &VacationBalance::new(21, 5).unwrap(),
        date(2024, 12, 1),
    )
    .unwrap_err();
    assert_eq!(err, LedgerError::NoWorkingDays);
    assert!(err.to_string().contains("at least 1 working day"));
}

#[test]
fn rejection_leaves_balance_alone() {
    let balance = VacationBalance::new(21, 2).unwrap();
    let request = stored(7, &draft(date(2024, 12, 2), date(2024, 12, 6)));
    let update = lifecycle::reject(&request).unwrap();
    assert_eq!(update.status, VacationStatus::Rejected);
    assert_eq!(balance.remaining(), 2);
}

#[test]
fn working_day_properties_hold_across_a_year() {
    let mut day = date(2024, 1, 1);
    while day <= date(2024, 12, 31) {
        let single = count_working_days(day, day);
        let weekend = matches!(
            chrono::Datelike::weekday(&day),
            chrono::Weekday::Sat | chrono::Weekday::Sun
        );
        assert_eq!(single, if weekend { 0 } else { 1 }, "{day}");
        assert_eq!(count_working_days(day + chrono::Duration::days(6), day), 0);
        assert_eq!(count_working_days(day, day + chrono::Duration::days(6)), 5);
        day = day.succ_opt().unwrap();
    }
}
