use serde::Serialize;
use serde_json::Value;

use super::assignment::{self, AssignmentReport, Assignments};
use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

#[derive(Clone, Copy)]
pub struct Concierges<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConciergeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
struct Apartment {
    apartment_id: Id,
}

impl Concierges<'_> {
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/concierges")).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/concierges/{}", id)))
            .await
    }

    pub async fn create(&self, body: &ConciergeInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/concierges").json(body)?;
        self.client.send(req).await
    }

    pub async fn update(&self, id: Id, body: &ConciergeInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/concierges/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/concierges/{}", id)))
            .await
    }

    pub async fn apartments(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/concierges/{}/apartments", id)))
            .await
    }

    pub async fn assign_apartment(&self, id: Id, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/concierges/{}/apartments", id))
            .json(&Apartment { apartment_id })?;
        self.client.send(req).await
    }

    pub async fn unassign_apartment(&self, id: Id, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::delete(format!("/concierges/{}/apartments/{}", id, apartment_id));
        self.client.send(req).await
    }

    /// Makes the concierge's apartments equal to `apartment_ids`.
    pub async fn update_apartments(
        &self,
        id: Id,
        apartment_ids: &[Id],
    ) -> ApiResult<AssignmentReport> {
        assignment::sync(self, id, apartment_ids).await
    }

    pub async fn my_apartments(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/concierge/apartments"))
            .await
    }

    pub async fn my_bookings(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/concierge/bookings"))
            .await
    }
}

impl Assignments for Concierges<'_> {
    async fn assigned(&self, owner: Id) -> ApiResult<Value> {
        self.apartments(owner).await
    }

    async fn assign(&self, owner: Id, apartment_id: Id) -> ApiResult<Value> {
        self.assign_apartment(owner, apartment_id).await
    }

    async fn unassign(&self, owner: Id, apartment_id: Id) -> ApiResult<Value> {
        self.unassign_apartment(owner, apartment_id).await
    }
}
