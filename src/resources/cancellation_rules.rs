use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

#[derive(Clone, Copy)]
pub struct CancellationRules<'a> {
    pub(super) client: &'a Client,
}

/// Refund policy applied when a guest cancels.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancellationRuleInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hours before check-in up to which the refund applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_before: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CancellationRules<'_> {
    pub async fn list(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/cancellation-rules"))
            .await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/cancellation-rules/{}", id)))
            .await
    }

    pub async fn create(&self, body: &CancellationRuleInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/cancellation-rules").json(body)?;
        self.client.send(req).await
    }

    pub async fn update(&self, id: Id, body: &CancellationRuleInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/cancellation-rules/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/cancellation-rules/{}", id)))
            .await
    }
}
