//! The seam between view models and the REST store.

use async_trait::async_trait;
use chronos_ledger::{
    NewVacationRequest, StatusUpdate, User, UserId, VacationRequest, VacationRequestId,
};

use crate::api::{ApiClient, ApiError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacationStore: Send + Sync {
    async fn employee_requests(
        &self,
        employee_id: UserId,
    ) -> Result<Vec<VacationRequest>, ApiError>;

    async fn administrator_requests(
        &self,
        administrator_id: UserId,
    ) -> Result<Vec<VacationRequest>, ApiError>;

    async fn create_request(
        &self,
        payload: NewVacationRequest,
    ) -> Result<VacationRequest, ApiError>;

    async fn update_status(
        &self,
        id: VacationRequestId,
        update: StatusUpdate,
    ) -> Result<VacationRequest, ApiError>;

    async fn user(&self, id: UserId) -> Result<User, ApiError>;

    async fn employees_of(&self, administrator_id: UserId) -> Result<Vec<User>, ApiError>;

    async fn all_employees(&self) -> Result<Vec<User>, ApiError>;
}

#[async_trait]
impl VacationStore for ApiClient {
    async fn employee_requests(
        &self,
        employee_id: UserId,
    ) -> Result<Vec<VacationRequest>, ApiError> {
        self.get_employee_vacation_requests(employee_id).await
    }

    async fn administrator_requests(
        &self,
        administrator_id: UserId,
    ) -> Result<Vec<VacationRequest>, ApiError> {
        self.get_administrator_vacation_requests(administrator_id)
            .await
    }

    async fn create_request(
        &self,
        payload: NewVacationRequest,
    ) -> Result<VacationRequest, ApiError> {
        self.create_vacation_request(&payload).await
    }

    async fn update_status(
        &self,
        id: VacationRequestId,
        update: StatusUpdate,
    ) -> Result<VacationRequest, ApiError> {
        self.update_vacation_request_status(id, &update).await
    }

    async fn user(&self, id: UserId) -> Result<User, ApiError> {
        self.get_user(id).await
    }

    async fn employees_of(&self, administrator_id: UserId) -> Result<Vec<User>, ApiError> {
        self.get_employees_by_administrator(administrator_id).await
    }

    async fn all_employees(&self) -> Result<Vec<User>, ApiError> {
        self.get_all_employees().await
    }
}
