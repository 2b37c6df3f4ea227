use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client, Paginated};

/// Rental agreements between owners and the platform.
#[derive(Clone, Copy)]
pub struct Contracts<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<Id>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Id>,
    /// Platform commission in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Contracts<'_> {
    pub async fn list(&self, filter: &ContractFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/contracts").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/contracts/{}", id)))
            .await
    }

    pub async fn create(&self, body: &ContractInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/contracts").json(body)?;
        self.client.send(req).await
    }

    pub async fn update(&self, id: Id, body: &ContractInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/contracts/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn for_apartment(&self, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::get(format!("/contracts/apartment/{}", apartment_id));
        self.client.send(req).await
    }

    pub async fn sign(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post(format!("/contracts/{}/sign", id)))
            .await
    }
}
