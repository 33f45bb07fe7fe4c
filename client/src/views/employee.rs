use chrono::NaiveDate;
use chrono_tz::Tz;
use chronos_ledger::{
    count_working_days, lifecycle, utils::today_local, validate_submission, LedgerError,
    NewVacationRequest, SessionContext, User, UserId, UserRole, VacationBalance, VacationRequest,
    VacationRequestId,
};
use std::sync::Arc;

use super::{ensure_session, ViewError};
use crate::store::VacationStore;

/// An employee's own requests and balance.
pub struct EmployeeViewModel {
    store: Arc<dyn VacationStore>,
    session: SessionContext,
    time_zone: Tz,
    profile: Option<User>,
    requests: Vec<VacationRequest>,
}

impl EmployeeViewModel {
    pub fn new(
        store: Arc<dyn VacationStore>,
        session: SessionContext,
        time_zone: Tz,
    ) -> Result<Self, ViewError> {
        ensure_session(&session)?;
        session.require_role(&[UserRole::Employee])?;
        Ok(Self {
            store,
            session,
            time_zone,
            profile: None,
            requests: Vec::new(),
        })
    }

    pub fn requests(&self) -> &[VacationRequest] {
        &self.requests
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// Balance as of the last load.
    pub fn balance(&self) -> Result<VacationBalance, ViewError> {
        match &self.profile {
            Some(user) => Ok(user.vacation_balance()?),
            None => Err(LedgerError::NoBalance(self.session.user_id).into()),
        }
    }

    /// Day count shown while a draft is being edited.
    pub fn preview_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        count_working_days(start, end)
    }

    pub async fn load(&mut self) -> Result<(), ViewError> {
        ensure_session(&self.session)?;
        let user = self.store.user(self.session.user_id).await?;
        let requests = self.store.employee_requests(self.session.user_id).await?;
        tracing::debug!(
            employee_id = %self.session.user_id,
            count = requests.len(),
            "Loaded vacation requests"
        );
        self.profile = Some(user);
        self.requests = requests;
        Ok(())
    }

    /// Validates the draft against a freshly fetched balance and creates it.
    ///
    /// `administrator` overrides the administrator on the employee's record.
    pub async fn submit(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        administrator: Option<UserId>,
    ) -> Result<VacationRequest, ViewError> {
        ensure_session(&self.session)?;
        let user = self.store.user(self.session.user_id).await?;
        let balance = user.vacation_balance()?;
        let draft = NewVacationRequest {
            employee_id: self.session.user_id,
            administrator_id: administrator
                .or(user.administrator_id)
                .unwrap_or(UserId::new(0)),
            start_date: start,
            end_date: end,
        };
        let today = today_local(&self.time_zone);
        let days = validate_submission(&draft, &balance, today)?;
        self.profile = Some(user);

        let created = self.store.create_request(draft).await?;
        tracing::info!(
            request_id = %created.id,
            employee_id = %created.employee_id,
            days,
            "Vacation request submitted"
        );
        self.requests.retain(|request| request.id != created.id);
        self.requests.insert(0, created.clone());
        Ok(created)
    }

    pub async fn cancel(&mut self, id: VacationRequestId) -> Result<VacationRequest, ViewError> {
        ensure_session(&self.session)?;
        if self.requests.is_empty() {
            self.load().await?;
        }
        let request = self
            .requests
            .iter()
            .find(|request| request.id == id)
            .cloned()
            .ok_or_else(|| {
                LedgerError::NotPermitted(format!("Request {} is not one of your requests", id))
            })?;
        let update = lifecycle::cancel(&request, self.session.user_id)?;

        match self.store.update_status(id, update).await {
            Ok(updated) => {
                tracing::info!(request_id = %id, "Vacation request cancelled");
                if let Some(slot) = self.requests.iter_mut().find(|r| r.id == id) {
                    *slot = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => {
                let err = ViewError::from(err);
                if err.is_conflict() {
                    self.resync().await;
                }
                Err(err)
            }
        }
    }

    async fn resync(&mut self) {
        if let Err(err) = self.load().await {
            tracing::warn!(error = %err, "Failed to refresh vacation requests");
        }
    }
}
