use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

/// Smart locks are addressed by their vendor unique id, not a numeric id.
#[derive(Clone, Copy)]
pub struct Locks<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LockInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<Id>,
}

/// Validity window of a generated door code.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PasswordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize)]
struct Binding {
    apartment_id: Id,
}

impl Locks<'_> {
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/locks")).await
    }

    pub async fn create(&self, body: &LockInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/locks").json(body)?;
        self.client.send(req).await
    }

    pub async fn get(&self, unique_id: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/locks/{}", unique_id)))
            .await
    }

    pub async fn update(&self, unique_id: &str, body: &LockInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/locks/{}", unique_id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, unique_id: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/locks/{}", unique_id)))
            .await
    }

    pub async fn generate_password(
        &self,
        unique_id: &str,
        body: &PasswordRequest,
    ) -> ApiResult<Value> {
        let req =
            ApiRequest::post(format!("/locks/password/{}/generate", unique_id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn passwords(&self, unique_id: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/locks/{}/passwords", unique_id)))
            .await
    }

    pub async fn delete_password(&self, unique_id: &str, password_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::delete(format!("/locks/{}/passwords/{}", unique_id, password_id));
        self.client.send(req).await
    }

    /// Battery, online state and last sync as reported by the vendor.
    pub async fn status(&self, unique_id: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/locks/{}/status", unique_id)))
            .await
    }

    pub async fn history(&self, unique_id: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/locks/{}/history", unique_id)))
            .await
    }

    pub async fn bind_apartment(&self, unique_id: &str, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/locks/{}/apartment", unique_id))
            .json(&Binding { apartment_id })?;
        self.client.send(req).await
    }

    pub async fn unbind_apartment(&self, unique_id: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/locks/{}/apartment", unique_id)))
            .await
    }
}
