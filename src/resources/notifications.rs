use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client, Envelope, Paginated, UnreadCount};

#[derive(Clone, Copy)]
pub struct Notifications<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_only: Option<bool>,
}

/// Browser push subscription as handed out by the push manager.
#[derive(Debug, Clone, Serialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: PushKeys,
}

#[derive(Debug, Clone, Serialize)]
pub struct PushKeys {
    pub p256dh: String,
    pub auth: String,
}

#[derive(Serialize)]
struct Endpoint<'a> {
    endpoint: &'a str,
}

impl Notifications<'_> {
    pub async fn list(&self, filter: &NotificationFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/notifications").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn unread_count(&self) -> ApiResult<u64> {
        let req = ApiRequest::get("/notifications/unread-count");
        let count: Envelope<UnreadCount> = self.client.fetch(req).await?;
        Ok(count.data.count)
    }

    pub async fn mark_read(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post(format!("/notifications/{}/read", id)))
            .await
    }

    pub async fn mark_all_read(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post("/notifications/read-all"))
            .await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/notifications/{}", id)))
            .await
    }

    pub async fn subscribe(&self, subscription: &PushSubscription) -> ApiResult<Value> {
        let req = ApiRequest::post("/notifications/subscribe").json(subscription)?;
        self.client.send(req).await
    }

    pub async fn unsubscribe(&self, endpoint: &str) -> ApiResult<Value> {
        let req = ApiRequest::post("/notifications/unsubscribe").json(&Endpoint { endpoint })?;
        self.client.send(req).await
    }

    pub async fn settings(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/notifications/settings"))
            .await
    }

    /// Settings are a flat map of notification type to enabled flag.
    pub async fn update_settings(&self, settings: &Value) -> ApiResult<Value> {
        let req = ApiRequest::put("/notifications/settings").json(settings)?;
        self.client.send(req).await
    }
}
