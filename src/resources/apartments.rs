use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client, Paginated, Upload};

#[derive(Clone, Copy)]
pub struct Apartments<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApartmentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_type_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    /// `pending`, `approved`, `rejected`, `blocked`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of create and update, the backend owns validation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApartmentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microdistrict_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_type_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_day: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_rule_id: Option<Id>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub condition_ids: Vec<Id>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub house_rule_ids: Vec<Id>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenity_ids: Vec<Id>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Serialize)]
struct Reason<'a> {
    reason: &'a str,
}

impl Apartments<'_> {
    pub async fn list(&self, filter: &ApartmentFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/apartments").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/apartments/{}", id)))
            .await
    }

    pub async fn create(&self, body: &ApartmentInput) -> ApiResult<Value> {
        let req = ApiRequest::post("/apartments").json(body)?;
        self.client.send(req).await
    }

    pub async fn update(&self, id: Id, body: &ApartmentInput) -> ApiResult<Value> {
        let req = ApiRequest::put(format!("/apartments/{}", id)).json(body)?;
        self.client.send(req).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/apartments/{}", id)))
            .await
    }

    /// Apartments of the signed in owner.
    pub async fn my(&self, filter: &ApartmentFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/apartments/my").query(filter)?;
        self.client.fetch(req).await
    }

    /// The backend reads the files from the `photos` field.
    pub async fn upload_photos(&self, id: Id, photos: Vec<Upload>) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/apartments/{}/photos", id)).uploads(photos);
        self.client.send(req).await
    }

    pub async fn delete_photo(&self, id: Id, photo_id: Id) -> ApiResult<Value> {
        let req = ApiRequest::delete(format!("/apartments/{}/photos/{}", id, photo_id));
        self.client.send(req).await
    }

    /// Ownership documents, reviewed by an admin before approval.
    pub async fn upload_documents(&self, id: Id, documents: Vec<Upload>) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/apartments/{}/documents", id)).uploads(documents);
        self.client.send(req).await
    }

    pub async fn availability(&self, id: Id, range: DateRange) -> ApiResult<Value> {
        let req = ApiRequest::get(format!("/apartments/{}/availability", id)).query(&range)?;
        self.client.send(req).await
    }

    pub async fn booked_dates(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/apartments/{}/booked-dates", id)))
            .await
    }

    pub async fn admin_list(&self, filter: &ApartmentFilter) -> ApiResult<Paginated> {
        let req = ApiRequest::get("/admin/apartments").query(filter)?;
        self.client.fetch(req).await
    }

    pub async fn admin_approve(&self, id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/admin/apartments/{}/approve", id));
        self.client.send(req).await
    }

    pub async fn admin_reject(&self, id: Id, reason: &str) -> ApiResult<Value> {
        let req =
            ApiRequest::post(format!("/admin/apartments/{}/reject", id)).json(&Reason { reason })?;
        self.client.send(req).await
    }

    pub async fn admin_block(&self, id: Id) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/admin/apartments/{}/block", id));
        self.client.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    use super::{ApartmentFilter, ApartmentInput, DateRange};
    use crate::api::testing::signed_in;
    use crate::api::Upload;

    #[tokio::test]
    async fn upload_photos_posts_to_apartment() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/apartments/12/photos")
                .header("authorization", "Bearer a1");
            then.status(201).json_body(json!({"data": [{"id": 1}, {"id": 2}]}));
        });

        let h = signed_in(&server, "a1", "r1");
        let photos = vec![
            Upload::new("photos", "living.jpg", vec![1, 2, 3]).with_mime("image/jpeg"),
            Upload::new("photos", "kitchen.png", vec![4, 5]).with_mime("image/png"),
        ];
        let body = h.client.apartments().upload_photos(12, photos).await.unwrap();

        mock.assert();
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn update_puts_body_to_id() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/apartments/314")
                .json_body(json!({"title": "Loft on Abay", "rooms": 2, "amenity_ids": [1, 4]}));
            then.status(200).json_body(json!({"data": {"id": 314}}));
        });

        let h = signed_in(&server, "a1", "r1");
        let input = ApartmentInput {
            title: Some("Loft on Abay".into()),
            rooms: Some(2),
            amenity_ids: vec![1, 4],
            ..Default::default()
        };
        let body = h.client.apartments().update(314, &input).await.unwrap();

        mock.assert();
        assert_eq!(body["data"]["id"], 314);
    }

    #[tokio::test]
    async fn list_omits_unset_filters() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/apartments")
                .query_param("city_id", "1")
                .query_param("rooms", "3");
            then.status(200).json_body(json!({"data": []}));
        });

        let h = signed_in(&server, "a1", "r1");
        let filter = ApartmentFilter {
            city_id: Some(1),
            rooms: Some(3),
            ..Default::default()
        };
        let page = h.client.apartments().list(&filter).await.unwrap();

        mock.assert();
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn availability_formats_dates() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/apartments/9/availability")
                .query_param("from", "2026-11-01")
                .query_param("to", "2026-11-05");
            then.status(200).json_body(json!({"data": {"available": true}}));
        });

        let h = signed_in(&server, "a1", "r1");
        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2026, 11, 5).unwrap(),
        };
        h.client.apartments().availability(9, range).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn admin_reject_sends_reason() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/apartments/5/reject")
                .json_body(json!({"reason": "photos missing"}));
            then.status(200).json_body(json!({"success": true}));
        });

        let h = signed_in(&server, "a1", "r1");
        h.client
            .apartments()
            .admin_reject(5, "photos missing")
            .await
            .unwrap();
        mock.assert();
    }
}
