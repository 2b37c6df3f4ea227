use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

/// City, district and microdistrict reference data.
#[derive(Clone, Copy)]
pub struct Locations<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationInput {
    pub name: String,
    /// Set for districts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<Id>,
    /// Set for microdistricts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<Id>,
}

impl Locations<'_> {
    pub async fn cities(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/locations/cities"))
            .await
    }

    pub async fn create_city(&self, body: &LocationInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/locations/cities").json(body)?;
        self.client.send(req).await
    }

    pub async fn update_city(&self, id: Id, body: &LocationInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/locations/cities/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete_city(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/locations/cities/{}", id)))
            .await
    }

    pub async fn districts(&self, city_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::get(format!("/locations/cities/{}/districts", city_id));
        self.client.send(req).await
    }

    pub async fn create_district(&self, body: &LocationInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/locations/districts").json(body)?;
        self.client.send(req).await
    }

    pub async fn update_district(&self, id: Id, body: &LocationInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/locations/districts/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete_district(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/locations/districts/{}", id)))
            .await
    }

    pub async fn microdistricts(&self, district_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::get(format!(
            "/locations/districts/{}/microdistricts",
            district_id
        ));
        self.client.send(req).await
    }

    pub async fn create_microdistrict(&self, body: &LocationInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/locations/microdistricts").json(body)?;
        self.client.send(req).await
    }

    pub async fn delete_microdistrict(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/locations/microdistricts/{}", id)))
            .await
    }
}
