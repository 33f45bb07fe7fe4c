use chronos_ledger::{NewVacationRequest, StatusUpdate, UserId, VacationRequest, VacationRequestId};

use super::{client::ApiClient, types::ApiError};

impl ApiClient {
    pub async fn get_employee_vacation_requests(
        &self,
        employee_id: UserId,
    ) -> Result<Vec<VacationRequest>, ApiError> {
        let url = self.endpoint(&format!("/vacation-requests/employee/{}", employee_id));
        let response = self.send_authorized(self.http().get(url)).await?;
        self.map_json_response(response).await
    }

    pub async fn get_administrator_vacation_requests(
        &self,
        administrator_id: UserId,
    ) -> Result<Vec<VacationRequest>, ApiError> {
        let url = self.endpoint(&format!(
            "/vacation-requests/administrator/{}",
            administrator_id
        ));
        let response = self.send_authorized(self.http().get(url)).await?;
        self.map_json_response(response).await
    }

    pub async fn create_vacation_request(
        &self,
        payload: &NewVacationRequest,
    ) -> Result<VacationRequest, ApiError> {
        tracing::info!(
            employee_id = %payload.employee_id,
            administrator_id = %payload.administrator_id,
            start = %payload.start_date,
            end = %payload.end_date,
            "Submitting vacation request"
        );
        let url = self.endpoint("/vacation-requests");
        let response = self
            .send_authorized(self.http().post(url).json(payload))
            .await?;
        self.map_json_response(response).await
    }

    pub async fn update_vacation_request_status(
        &self,
        id: VacationRequestId,
        update: &StatusUpdate,
    ) -> Result<VacationRequest, ApiError> {
        tracing::info!(request_id = %id, status = %update.status, "Updating vacation request status");
        let url = self.endpoint(&format!("/vacation-requests/{}/status", id));
        let response = self
            .send_authorized(self.http().put(url).json(update))
            .await?;
        self.map_json_response(response).await
    }
}
