use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

#[derive(Clone, Copy)]
pub struct Favorites<'a> {
    pub(super) client: &'a Client,
}

impl Favorites<'_> {
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/favorites")).await
    }

    pub async fn add(&self, apartment_id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post(format!("/favorites/{}", apartment_id)))
            .await
    }

    pub async fn remove(&self, apartment_id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/favorites/{}", apartment_id)))
            .await
    }

    /// Whether the apartment is in the favorites of the signed in user.
    pub async fn check(&self, apartment_id: Id) -> ApiResult<bool> {
        let body = self
            .client
            .send(ApiRequest::get(format!("/favorites/{}/check", apartment_id)))
            .await?;
        let data = body.get("data").unwrap_or(&body);
        Ok(data
            .get("is_favorite")
            .and_then(Value::as_bool)
            .or_else(|| data.as_bool())
            .unwrap_or(false))
    }
}
