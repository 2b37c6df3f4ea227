use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client, Paginated, Upload};

#[derive(Clone, Copy)]
pub struct Users<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// `admin`, `owner`, `tenant`, `concierge`, `cleaner`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Matches name or phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Serialize)]
struct Role<'a> {
    role: &'a str,
}

impl Users<'_> {
    pub async fn admin_get_all_users(&self, filter: &UserFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/admin/users").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn admin_get_user(&self, id: Id) -> ApiResult<Value> {
        let req = ApiRequest::get(format!("/admin/users/{}", id));
        self.client.send(req).await
    }

    pub async fn admin_update_user(&self, id: Id, body: &UserUpdate) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/admin/users/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn admin_set_role(&self, id: Id, role: &str) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/admin/users/{}/role", id)).json(&Role { role })?;
        self.client.send(req).await
    }

    pub async fn admin_block_user(&self, id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/admin/users/{}/block", id));
        self.client.send(req).await
    }

    pub async fn admin_unblock_user(&self, id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/admin/users/{}/unblock", id));
        self.client.send(req).await
    }

    pub async fn admin_delete_user(&self, id: Id) -> ApiResult<Value> {
        let req = ApiRequest::delete(format!("/admin/users/{}", id));
        self.client.send(req).await
    }

    pub async fn admin_statistics(&self) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get("/admin/users/statistics"))
            .await
    }

    /// Replace the avatar of the signed in user.
    pub async fn upload_avatar(&self, avatar: Upload) -> ApiResult<Value> {
        let req = ApiRequest::post("/users/avatar").uploads(vec![avatar]);
        self.client.send(req).await
    }
}
