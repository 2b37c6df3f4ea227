use serde::Serialize;
use serde_json::Value;

use super::assignment::{self, AssignmentReport, Assignments};
use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

/// Cleaner management for admins and owners, plus the cleaner's own views.
#[derive(Clone, Copy)]
pub struct Cleaners<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanerInput {
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

impl Cleaners<'_> {
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/cleaners")).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/cleaners/{}", id)))
            .await
    }

    pub async fn create(&self, body: &CleanerInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/cleaners").json(body)?;
        self.client.send(req).await
    }

    pub async fn update(&self, id: Id, body: &CleanerInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/cleaners/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/cleaners/{}", id)))
            .await
    }

    pub async fn apartments(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/cleaners/{}/apartments", id)))
            .await
    }

    pub async fn assign_apartment(&self, id: Id, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/cleaners/{}/apartments", id))
            .json(&Apartment { apartment_id })?;
        self.client.send(req).await
    }

    pub async fn unassign_apartment(&self, id: Id, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::delete(format!("/cleaners/{}/apartments/{}", id, apartment_id));
        self.client.send(req).await
    }

    /// Makes the cleaner's apartments equal to `apartment_ids`.
    ///
    /// See [`AssignmentReport`] for how partial failures are reported.
    pub async fn update_apartments(
        &self,
        id: Id,
        apartment_ids: &[Id],
    ) -> ApiResult<AssignmentReport> {
        assignment::sync(self, id, apartment_ids).await
    }

    pub async fn my_apartments(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/cleaner/apartments"))
            .await
    }

    pub async fn schedule(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/cleaner/schedule")).await
    }

    pub async fn start_cleaning(&self, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!(
            "/cleaner/apartments/{}/start-cleaning",
            apartment_id
        ));
        self.client.send(req).await
    }

    pub async fn complete_cleaning(&self, apartment_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!(
            "/cleaner/apartments/{}/complete-cleaning",
            apartment_id
        ));
        self.client.send(req).await
    }
}

impl Assignments for Cleaners<'_> {
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
