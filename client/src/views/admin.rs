use chronos_ledger::{
    lifecycle, LedgerError, Placement, RequestBoard, SessionContext, StatusUpdate, User, UserId,
    UserRole, VacationBalance, VacationRequest, VacationRequestId,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::{ensure_session, ViewError};
use crate::store::VacationStore;

/// Administrator board: pending decisions, recent decisions and the
/// employees behind them.
pub struct AdminViewModel {
    store: Arc<dyn VacationStore>,
    session: SessionContext,
    board: RequestBoard,
    employees: HashMap<UserId, User>,
    balances: HashMap<UserId, VacationBalance>,
}

impl AdminViewModel {
    pub fn new(store: Arc<dyn VacationStore>, session: SessionContext) -> Result<Self, ViewError> {
        ensure_session(&session)?;
        session.require_role(&[UserRole::Administrator, UserRole::SuperAdmin])?;
        Ok(Self {
            store,
            session,
            board: RequestBoard::default(),
            employees: HashMap::new(),
            balances: HashMap::new(),
        })
    }

    pub fn board(&self) -> &RequestBoard {
        &self.board
    }

    pub fn display_name(&self, employee_id: UserId) -> String {
        self.employees
            .get(&employee_id)
            .map(|user| user.display_name().to_string())
            .unwrap_or_else(|| format!("Employee #{}", employee_id))
    }

    pub fn balance_of(&self, employee_id: UserId) -> Option<VacationBalance> {
        self.balances.get(&employee_id).copied()
    }

    /// Authoritative reload of the board and the employees on it.
    ///
    /// A super admin sees every employee's requests, whichever administrator
    /// they are addressed to.
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        ensure_session(&self.session)?;
        let (requests, fetched) = match self.session.role {
            UserRole::SuperAdmin => {
                let employees = self.store.all_employees().await?;
                let mut requests = Vec::new();
                for employee in &employees {
                    requests.extend(self.store.employee_requests(employee.id).await?);
                }
                (requests, employees)
            }
            _ => {
                let requests = self
                    .store
                    .administrator_requests(self.session.user_id)
                    .await?;
                (requests, Vec::new())
            }
        };
        self.board.replace_all(requests);
        tracing::debug!(
            administrator_id = %self.session.user_id,
            role = %self.session.role,
            actionable = self.board.actionable().len(),
            processed = self.board.processed().len(),
            "Board refreshed"
        );

        let fresh: BTreeSet<UserId> = fetched.iter().map(|user| user.id).collect();
        for user in fetched {
            self.remember(user);
        }
        self.resolve_employees(&fresh).await;
        Ok(())
    }

    async fn resolve_employees(&mut self, fresh: &BTreeSet<UserId>) {
        let ids: BTreeSet<UserId> = self
            .board
            .actionable()
            .iter()
            .chain(self.board.processed())
            .map(|request| request.employee_id)
            .filter(|id| !fresh.contains(id))
            .collect();

        for id in ids {
            match self.store.user(id).await {
                Ok(user) => self.remember(user),
                Err(err) => {
                    tracing::warn!(employee_id = %id, error = %err, "Employee lookup failed");
                    self.employees.remove(&id);
                    self.balances.remove(&id);
                }
            }
        }
    }

    fn remember(&mut self, user: User) {
        match user.vacation_balance() {
            Ok(balance) => {
                self.balances.insert(user.id, balance);
            }
            Err(err) => {
                tracing::warn!(employee_id = %user.id, error = %err, "Ignoring unusable balance");
                self.balances.remove(&user.id);
            }
        }
        self.employees.insert(user.id, user);
    }

    pub async fn approve(&mut self, id: VacationRequestId) -> Result<VacationRequest, ViewError> {
        let request = self.decidable(id)?;
        // The balance is read fresh; the board's copy may be stale.
        let user = self.store.user(request.employee_id).await?;
        let balance = user.vacation_balance()?;
        let approval = lifecycle::approve(&request, &balance)?;

        let updated = self.send_decision(id, approval.update).await?;
        self.balances
            .insert(request.employee_id, approval.projected_balance);
        tracing::info!(
            request_id = %id,
            employee_id = %request.employee_id,
            days = approval.days,
            remaining = approval.projected_balance.remaining(),
            "Vacation request approved"
        );
        self.resync().await;
        Ok(updated)
    }

    pub async fn reject(&mut self, id: VacationRequestId) -> Result<VacationRequest, ViewError> {
        let request = self.decidable(id)?;
        let update = lifecycle::reject(&request)?;

        let updated = self.send_decision(id, update).await?;
        tracing::info!(
            request_id = %id,
            employee_id = %request.employee_id,
            "Vacation request rejected"
        );
        self.resync().await;
        Ok(updated)
    }

    /// Employees this administrator may see; all of them for a super admin.
    pub async fn employees(&self) -> Result<Vec<User>, ViewError> {
        ensure_session(&self.session)?;
        let users = match self.session.role {
            UserRole::SuperAdmin => self.store.all_employees().await?,
            _ => self.store.employees_of(self.session.user_id).await?,
        };
        Ok(users)
    }

    fn decidable(&self, id: VacationRequestId) -> Result<VacationRequest, ViewError> {
        ensure_session(&self.session)?;
        let request = self.board.find(id).cloned().ok_or_else(|| {
            LedgerError::NotPermitted(format!("Request {} is not on your board", id))
        })?;
        lifecycle::ensure_can_decide(&request, self.session.user_id, self.session.role)?;
        Ok(request)
    }

    async fn send_decision(
        &mut self,
        id: VacationRequestId,
        update: StatusUpdate,
    ) -> Result<VacationRequest, ViewError> {
        match self.store.update_status(id, update).await {
            Ok(updated) => {
                if self.board.apply_update(updated.clone()) == Placement::Actionable {
                    tracing::warn!(request_id = %id, status = %updated.status, "Decision left request pending");
                }
                Ok(updated)
            }
            Err(err) => {
                let err = ViewError::from(err);
                if err.is_conflict() {
                    tracing::info!(request_id = %id, "Decision refused; reloading board");
                    self.resync().await;
                }
                Err(err)
            }
        }
    }

    async fn resync(&mut self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "Board refresh failed; keeping local state");
        }
    }
}
