use chronos_ledger::{User, UserId};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{client::ApiClient, types::ApiError};

/// Same set `encodeURIComponent` leaves alone.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

impl ApiClient {
    pub async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let url = self.endpoint(&format!("/users/{}", id));
        let response = self.send_authorized(self.http().get(url)).await?;
        self.map_json_response(response).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, ApiError> {
        let encoded = utf8_percent_encode(email.trim(), PATH_SEGMENT);
        let url = self.endpoint(&format!("/users/email/{}", encoded));
        let response = self.send_authorized(self.http().get(url)).await?;
        self.map_json_response(response).await
    }

    pub async fn get_employees_by_administrator(
        &self,
        administrator_id: UserId,
    ) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint(&format!("/users/administrator/{}/employees", administrator_id));
        let response = self.send_authorized(self.http().get(url)).await?;
        self.map_json_response(response).await
    }

    pub async fn get_all_employees(&self) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint("/users/employees");
        let response = self.send_authorized(self.http().get(url)).await?;
        self.map_json_response(response).await
    }
}
