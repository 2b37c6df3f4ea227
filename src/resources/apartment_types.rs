use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

#[derive(Clone, Copy)]
pub struct ApartmentTypes<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApartmentTypeInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApartmentTypes<'_> {
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/apartment-types")).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/apartment-types/{}", id)))
            .await
    }

    pub async fn create(&self, body: &ApartmentTypeInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/apartment-types").json(body)?;
        self.client.send(req).await
    }

    pub async fn update(&self, id: Id, body: &ApartmentTypeInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/apartment-types/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/apartment-types/{}", id)))
            .await
    }
}
