use serde::Serialize;
use serde_json::Value;

use super::Id;
use crate::api::{ApiRequest, ApiResult, Client, Upload};

#[derive(Clone, Copy)]
pub struct Chat<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenRoom {
    pub participant_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<Id>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Only messages older than this message id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Id>,
}

#[derive(Serialize)]
struct Text<'a> {
    text: &'a str,
}

impl Chat<'_> {
    pub async fn rooms(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/chat/rooms")).await
    }

    pub async fn room(&self, id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::get(format!("/chat/rooms/{}", id)))
            .await
    }

    /// Opens the room with `participant_id`, or returns the existing one.
    pub async fn open_room(&self, body: &OpenRoom) -> ApiResult<Value> {
        let req = ApiRequest::post("/chat/rooms").json(body)?;
        self.client.send(req).await
    }

    pub async fn messages(&self, room_id: Id, filter: &MessageFilter) -> ApiResult<Value> {
        let req = ApiRequest::get(format!("/chat/rooms/{}/messages", room_id)).query(filter)?;
        self.client.send(req).await
    }

    pub async fn send_message(&self, room_id: Id, text: &str) -> ApiResult<Value> {
        let req = ApiRequest::post(format!("/chat/rooms/{}/messages", room_id))
            .json(&Text { text })?;
        self.client.send(req).await
    }

    pub async fn mark_room_read(&self, room_id: Id) -> ApiResult<Value> {
        self.client
            .send(ApiRequest::post(format!("/chat/rooms/{}/read", room_id)))
            .await
    }

    pub async fn upload_attachment(&self, room_id: Id, file: Upload) -> ApiResult<Value> {
        let req =
            ApiRequest::post(format!("/chat/rooms/{}/attachments", room_id)).uploads(vec![file]);
        self.client.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::MessageFilter;
    use crate::api::testing::signed_in;

    #[tokio::test]
    async fn send_message_body() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/rooms/4/messages")
                .json_body(json!({"text": "Where are the keys?"}));
            then.status(201).json_body(json!({"data": {"id": 100}}));
        });

        let h = signed_in(&server, "a1", "r1");
        h.client
            .chat()
            .send_message(4, "Where are the keys?")
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn messages_before_cursor() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/chat/rooms/4/messages")
                .query_param("before", "100")
                .query_param("page_size", "50");
            then.status(200).json_body(json!({"data": []}));
        });

        let h = signed_in(&server, "a1", "r1");
        let filter = MessageFilter {
            before: Some(100),
            page_size: Some(50),
            ..Default::default()
        };
        h.client.chat().messages(4, &filter).await.unwrap();
        mock.assert();
    }
}
