use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client, Paginated};

#[derive(Clone, Copy)]
pub struct Bookings<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// `pending`, `approved`, `rejected`, `cancelled`, `active`, `finished`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub apartment_id: Id,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Price preview for a stay, nothing gets reserved.
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    pub apartment_id: Id,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Serialize)]
struct Reason<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct Extension {
    new_end_date: NaiveDateTime,
}

impl Bookings<'_> {
    pub async fn list(&self, filter: &BookingFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/bookings").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/bookings/{}", id)))
            .await
    }

    pub async fn create(&self, body: &BookingCreate) -> ApiResult<Value> {
        let req = ApiRequest::post("/bookings").json(body)?;
        self.client.send(req).await
    }

    pub async fn calculate(&self, body: &PriceQuote) -> ApiResult<Value> {
        let req = ApiRequest::post("/bookings/calculate").json(body)?;
        self.client.send(req).await
    }

    pub async fn approve(&self, id: Id) -> ApiResult<Value> {
        self.action(id, "approve").await
    }

    pub async fn reject(&self, id: Id, reason: Option<&str>) -> ApiResult<Value> {
        self.action_with_reason(id, "reject", reason).await
    }

    pub async fn cancel(&self, id: Id, reason: Option<&str>) -> ApiResult<Value> {
        self.action_with_reason(id, "cancel", reason).await
    }

    /// Close a stay early, the apartment goes to cleaning.
    pub async fn finish(&self, id: Id) -> ApiResult<Value> {
        self.action(id, "finish").await
    }

    pub async fn extend(&self, id: Id, new_end_date: NaiveDateTime) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/bookings/{}/extend", id))
            .json(&Extension { new_end_date })?;
        self.client.send(req).await
    }

    /// Start payment, the response carries the payment page url.
    pub async fn pay(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post(format!("/bookings/{}/payment", id)))
            .await
    }

    /// Bookings on apartments of the signed in owner.
    pub async fn owner_list(&self, filter: &BookingFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/owner/bookings").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn admin_list(&self, filter: &BookingFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/admin/bookings").query(filter)?;
        self.client.fetch(req).await
    }

    async fn action(&self, id: Id, action: &str) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post(format!("/bookings/{}/{}", id, action)))
            .await
    }

    async fn action_with_reason(
        &self,
        id: Id,
        action: &str,
        reason: Option<&str>,
    ) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/bookings/{}/{}", id, action))
            .json(&Reason { reason })?;
        self.client.send(req).await
    }
}
