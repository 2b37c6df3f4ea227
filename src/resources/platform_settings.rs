use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiRequest, ApiResult, Client};

/// Platform wide key/value settings, such as the service fee.
#[derive(Clone, Copy)]
pub struct PlatformSettings<'a> {
    pub(super) client: &'a Client,
}

#[derive(Serialize)]
struct Setting<'a> {
    value: &'a Value,
}

impl PlatformSettings<'_> {
    pub async fn all(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/settings")).await
    }

    pub async fn get(&self, key: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/settings/{}", key)))
            .await
    }

    pub async fn update(&self, key: &str, value: &Value) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/settings/{}", key)).json(&Setting { value })?;
        self.client.send(req).await
    }
}
