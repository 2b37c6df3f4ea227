use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client};

#[derive(Clone, Copy)]
pub struct Dictionaries<'a> {
    pub(super) client: &'a Client,
}

/// Editable lookup lists shown on the apartment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryKind {
    Conditions,
    HouseRules,
    Amenities,
}

impl DictionaryKind {
    pub fn as_path(self) -> &'static str {
        match self {
            DictionaryKind::Conditions => "conditions",
            DictionaryKind::HouseRules => "house-rules",
            DictionaryKind::Amenities => "amenities",
        }
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DictionaryEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kz: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Dictionaries<'_> {
    /// Every dictionary in one response.
    pub async fn all(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/dictionaries")).await
    }

    pub async fn list(&self, kind: DictionaryKind) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/dictionaries/{}", kind)))
            .await
    }

    pub async fn create(&self, kind: DictionaryKind, entry: &DictionaryEntry) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/dictionaries/{}", kind)).json(entry)?;
        self.client.send(req).await
    }

    pub async fn update(
        &self,
        kind: DictionaryKind,
        id: Id,
        entry: &DictionaryEntry,
    ) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/dictionaries/{}/{}", kind, id)).json(entry)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, kind: DictionaryKind, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/dictionaries/{}/{}", kind, id)))
            .await
    }
}
