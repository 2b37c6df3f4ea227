//! Exposes a `Client` struct that every resource namespace sends through.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use futures::future::FutureExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use super::hooks::UiHooks;
use super::model::{Envelope, LoginData, TokenPair};
use super::request::{ApiRequest, Body, REFRESH_PATH};
use super::session::Session;
use super::storage::TokenStorage;
use crate::config::Config;

fn elapsed_ms(start: &Instant) -> u128 {
    start.elapsed().as_millis()
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Configured request pipeline, cheap to clone.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    /// Use to make REST requests
    http: reqwest::Client,
    /// Example: `https://api.renti.kz/api`
    base_url: String,
    /// Toast text when the server didn't send a message
    fallback_message: String,
    session: Session,
    hooks: Arc<dyn UiHooks>,
}

impl Client {
    pub fn new(
        config: &Config,
        storage: Arc<dyn TokenStorage>,
        hooks: Arc<dyn UiHooks>,
    ) -> anyhow::Result<Client> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("invalid header name {}", name))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("invalid value for header {}", name))?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("invalid http client configuration")?;

        Ok(Client {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                fallback_message: config.fallback_message.clone(),
                session: Session::new(storage),
                hooks,
            }),
        })
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Example: `client.make_url("/bookings")` will produce `{base_url}/bookings`
    pub fn make_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Send a request and return the unwrapped response body.
    ///
    /// A 401 outside of the login endpoint refreshes the session once and
    /// repeats the request with the new access token.
    pub async fn send(&self, req: ApiRequest) -> ApiResult<Value> {
        let token = self.session().access_token();

        match self.dispatch(&req, token.as_deref()).await {
            Ok(body) => Ok(body),
            Err(err) if err.is_unauthorized() && !req.is_login() => {
                self.recover(&req, token.as_deref(), err).await
            }
            Err(err) => Err(self.report(&req, err)),
        }
    }

    /// Like [`Client::send`] but decodes the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, req: ApiRequest) -> ApiResult<T> {
        let body = self.send(req).await?;
        serde_json::from_value(body).map_err(ApiError::decode)
    }

    /// Log in and keep the returned token pair.
    pub async fn sign_in(&self, phone: &str, password: &str) -> ApiResult<LoginData> {
        let login = self.auth().login(phone, password).await?;
        self.session().store(&login.data.tokens);
        log::info!("signed in as {}", phone);
        Ok(login.data)
    }

    /// Log out on the server, the local tokens are dropped either way.
    pub async fn sign_out(&self) -> ApiResult<()> {
        let result = self.auth().logout().await;
        self.session().clear();
        result.map(|_| ())
    }

    async fn recover(
        &self,
        req: &ApiRequest,
        used_token: Option<&str>,
        original: ApiError,
    ) -> ApiResult<Value> {
        // another request already rotated the tokens while this one was in flight
        let current = self.session().access_token();
        if let Some(current) = current.as_deref().filter(|c| Some(*c) != used_token) {
            log::debug!("{} {} got 401 with a stale token", req.method, req.path);
            return self.retry(req, current).await;
        }

        let Some(refresh_token) = self.session().refresh_token() else {
            // sent signed in but the session is gone, whoever cleared it redirected
            if used_token.is_some() && current.is_none() {
                log::debug!("{} {} got 401 after the session ended", req.method, req.path);
                return Err(original);
            }
            log::warn!("{} {} got 401 and there is no refresh token", req.method, req.path);
            self.end_session();
            return Err(original);
        };

        let refresh = self.session().join_refresh(move || {
            let client = self.clone();
            async move { client.refresh_session(refresh_token).await }.boxed()
        });
        let outcome = refresh.clone().await;
        self.session().finish_refresh(&refresh);

        let tokens = outcome?;
        self.retry(req, &tokens.access_token).await
    }

    /// Trade the refresh token for a new pair, runs once per shared refresh.
    async fn refresh_session(&self, refresh_token: String) -> ApiResult<TokenPair> {
        log::info!("access token expired, refreshing session");

        let outcome: ApiResult<TokenPair> = async {
            let req = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
                refresh_token: &refresh_token,
            })?;
            let body = self.dispatch(&req, None).await?;
            let envelope: Envelope<TokenPair> =
                serde_json::from_value(body).map_err(ApiError::decode)?;
            Ok(envelope.data)
        }
        .await;

        match outcome {
            Ok(tokens) => {
                self.session().store(&tokens);
                Ok(tokens)
            }
            Err(err) => {
                log::warn!("couldn't refresh session: {}", err);
                self.end_session();
                Err(err)
            }
        }
    }

    async fn retry(&self, req: &ApiRequest, token: &str) -> ApiResult<Value> {
        self.dispatch(req, Some(token))
            .await
            .map_err(|err| self.report(req, err))
    }

    fn end_session(&self) {
        self.session().clear();
        self.inner.hooks.redirect_to_login();
    }

    /// Toast about a failed request and hand the error back.
    ///
    /// Only a 401 from the login endpoint stays silent.
    fn report(&self, req: &ApiRequest, err: ApiError) -> ApiError {
        if !(req.is_login() && err.is_unauthorized()) {
            let message = err
                .server_message()
                .unwrap_or(&self.inner.fallback_message);
            self.inner.hooks.toast_error(message);
        }
        err
    }

    pub(crate) fn build(&self, req: &ApiRequest, token: Option<&str>) -> ApiResult<RequestBuilder> {
        let mut builder = self
            .inner
            .http
            .request(req.method.clone(), self.make_url(&req.path));

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        Ok(match &req.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(fields) => builder.multipart(Body::to_form(fields)?),
        })
    }

    async fn dispatch(&self, req: &ApiRequest, token: Option<&str>) -> ApiResult<Value> {
        let now = Instant::now();

        let resp = match self.build(req, token)?.send().await {
            Ok(resp) => resp,
            Err(err) => {
                log::warn!(
                    "{} {} failed after {}ms: {}",
                    req.method,
                    req.path,
                    elapsed_ms(&now),
                    err
                );
                return Err(err.into());
            }
        };

        let status = resp.status();
        let text = resp.text().await?;

        log::info!(
            "{} {} ({}) took {}ms",
            req.method,
            req.path,
            status.as_u16(),
            elapsed_ms(&now),
        );

        if !status.is_success() {
            return Err(ApiError::from_response(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(ApiError::decode)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use serde_json::{json, Value};

    use crate::api::testing::{harness, harness_with, signed_in};
    use crate::api::{ApiError, ApiRequest, Upload};
    use crate::config::Config;

    fn expired() -> Value {
        json!({"success": false, "message": "token expired"})
    }

    #[tokio::test]
    async fn success_returns_body_only() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/apartments/3")
                .header("authorization", "Bearer a1");
            then.status(200)
                .json_body(json!({"success": true, "data": {"id": 3}}));
        });

        let h = signed_in(&server, "a1", "r1");
        let body = h.client.send(ApiRequest::get("/apartments/3")).await.unwrap();

        mock.assert();
        assert_eq!(body, json!({"success": true, "data": {"id": 3}}));
        assert!(h.hooks.toasts().is_empty());
    }

    #[tokio::test]
    async fn empty_body_is_null() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/favorites/5");
            then.status(204);
        });

        let h = signed_in(&server, "a1", "r1");
        let body = h.client.send(ApiRequest::delete("/favorites/5")).await.unwrap();
        assert_eq!(body, Value::Null);
    }

    #[test]
    fn no_authorization_without_token() {
        let server = MockServer::start();
        let h = harness(&server);

        let req = h
            .client
            .build(&ApiRequest::get("/apartments"), h.client.session().access_token().as_deref())
            .unwrap()
            .build()
            .unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());

        let h = signed_in(&server, "a1", "r1");
        let req = h
            .client
            .build(&ApiRequest::get("/apartments"), h.client.session().access_token().as_deref())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer a1");
    }

    #[test]
    fn multipart_overrides_json_content_type() {
        let server = MockServer::start();
        let h = signed_in(&server, "a1", "r1");

        let upload = Upload::new("photos", "front.jpg", vec![0xff, 0xd8]).with_mime("image/jpeg");
        let req = ApiRequest::post("/apartments/4/photos").uploads(vec![upload]);
        let built = h.client.build(&req, Some("a1")).unwrap().build().unwrap();

        let content_type = built.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[test]
    fn invalid_mime_is_rejected() {
        let server = MockServer::start();
        let h = signed_in(&server, "a1", "r1");

        let upload = Upload::new("documents", "deed.pdf", vec![1]).with_mime("not a mime");
        let req = ApiRequest::post("/apartments/4/documents").uploads(vec![upload]);
        assert!(matches!(h.client.build(&req, None), Err(ApiError::Upload(_))));
    }

    #[tokio::test]
    async fn unauthorized_refreshes_once_and_retries() {
        let server = MockServer::start_async().await;
        let stale = server.mock(|when, then| {
            when.method(GET)
                .path("/bookings/7")
                .header("authorization", "Bearer a1");
            then.status(401).json_body(expired());
        });
        let refresh = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/refresh")
                .json_body(json!({"refresh_token": "r1"}));
            then.status(200)
                .json_body(json!({"data": {"access_token": "a2", "refresh_token": "r2"}}));
        });
        let fresh = server.mock(|when, then| {
            when.method(GET)
                .path("/bookings/7")
                .header("authorization", "Bearer a2");
            then.status(200).json_body(json!({"data": {"id": 7}}));
        });

        let h = signed_in(&server, "a1", "r1");
        let body = h.client.send(ApiRequest::get("/bookings/7")).await.unwrap();

        assert_eq!(body["data"]["id"], 7);
        stale.assert_hits(1);
        refresh.assert_hits(1);
        fresh.assert_hits(1);
        assert_eq!(h.client.session().access_token().as_deref(), Some("a2"));
        assert_eq!(h.client.session().refresh_token().as_deref(), Some("r2"));
        assert!(h.hooks.toasts().is_empty());
        assert_eq!(h.hooks.redirects(), 0);
    }

    #[tokio::test]
    async fn concurrent_unauthorized_share_one_refresh() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).header("authorization", "Bearer a1");
            then.status(401).json_body(expired());
        });
        let refresh = server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(200)
                .delay(Duration::from_millis(50))
                .json_body(json!({"data": {"access_token": "a2", "refresh_token": "r2"}}));
        });
        let fresh = server.mock(|when, then| {
            when.method(GET).header("authorization", "Bearer a2");
            then.status(200).json_body(json!({"data": []}));
        });

        let h = signed_in(&server, "a1", "r1");
        let (a, b, c) = futures::join!(
            h.client.send(ApiRequest::get("/bookings")),
            h.client.send(ApiRequest::get("/notifications")),
            h.client.send(ApiRequest::get("/locks")),
        );

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        refresh.assert_hits(1);
        fresh.assert_hits(3);
    }

    #[tokio::test]
    async fn failed_refresh_clears_session() {
        let server = MockServer::start_async().await;
        let original = server.mock(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(401).json_body(expired());
        });
        let refresh = server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(401)
                .json_body(json!({"message": "refresh token revoked"}));
        });

        let h = signed_in(&server, "a1", "r1");
        let err = h.client.send(ApiRequest::get("/auth/me")).await.unwrap_err();

        original.assert_hits(1);
        refresh.assert_hits(1);
        assert_eq!(err.server_message(), Some("refresh token revoked"));
        assert_eq!(h.client.session().access_token(), None);
        assert_eq!(h.client.session().refresh_token(), None);
        assert_eq!(h.hooks.redirects(), 1);
        assert!(h.hooks.toasts().is_empty());
    }

    #[tokio::test]
    async fn late_unauthorized_after_failed_refresh_redirects_once() {
        let server = MockServer::start_async().await;
        let fast = server.mock(|when, then| {
            when.method(GET).path("/bookings");
            then.status(401).json_body(expired());
        });
        let slow = server.mock(|when, then| {
            when.method(GET).path("/favorites");
            then.status(401)
                .json_body(expired())
                .delay(Duration::from_millis(300));
        });
        let refresh = server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(401)
                .json_body(json!({"message": "refresh token revoked"}));
        });

        let h = signed_in(&server, "a1", "r1");
        let (a, b) = futures::join!(
            h.client.send(ApiRequest::get("/bookings")),
            h.client.send(ApiRequest::get("/favorites")),
        );

        assert!(a.is_err());
        assert_eq!(b.unwrap_err().server_message(), Some("token expired"));
        fast.assert_hits(1);
        slow.assert_hits(1);
        refresh.assert_hits(1);
        assert_eq!(h.hooks.redirects(), 1);
        assert!(!h.client.is_authenticated());
    }

    #[tokio::test]
    async fn missing_refresh_token_redirects() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/favorites");
            then.status(401).json_body(expired());
        });
        let refresh = server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(200);
        });

        let h = harness(&server);
        let err = h.client.send(ApiRequest::get("/favorites")).await.unwrap_err();

        refresh.assert_hits(0);
        assert_eq!(err.server_message(), Some("token expired"));
        assert_eq!(h.hooks.redirects(), 1);
        assert!(!h.client.is_authenticated());
    }

    #[tokio::test]
    async fn login_unauthorized_is_left_to_caller() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401)
                .json_body(json!({"message": "wrong phone or password"}));
        });
        let refresh = server.mock(|when, then| {
            when.method(POST).path("/auth/refresh");
            then.status(200);
        });

        let h = signed_in(&server, "a1", "r1");
        let err = h.client.sign_in("+77001234567", "hunter2").await.unwrap_err();

        assert!(err.is_unauthorized());
        refresh.assert_hits(0);
        assert!(h.hooks.toasts().is_empty());
        assert_eq!(h.hooks.redirects(), 0);
        assert_eq!(h.client.session().access_token().as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn login_server_error_still_toasts() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(500).json_body(json!({"message": "database down"}));
        });

        let h = harness(&server);
        let err = h.client.sign_in("+77001234567", "hunter2").await.unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
        assert_eq!(h.hooks.toasts(), ["database down"]);
    }

    #[tokio::test]
    async fn sign_in_stores_tokens() {
        let server = MockServer::start_async().await;
        let login = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({"phone": "+77001234567", "password": "hunter2"}));
            then.status(200).json_body(json!({
                "success": true,
                "data": {"access_token": "a9", "refresh_token": "r9", "user": {"id": 1}}
            }));
        });

        let h = harness(&server);
        let data = h.client.sign_in("+77001234567", "hunter2").await.unwrap();

        login.assert();
        assert_eq!(data.user.unwrap()["id"], 1);
        assert_eq!(h.client.session().access_token().as_deref(), Some("a9"));
        assert_eq!(h.client.session().refresh_token().as_deref(), Some("r9"));
    }

    #[tokio::test]
    async fn sign_out_clears_even_on_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/logout");
            then.status(500);
        });

        let h = signed_in(&server, "a1", "r1");
        assert!(h.client.sign_out().await.is_err());
        assert!(!h.client.is_authenticated());
    }

    #[tokio::test]
    async fn error_toast_uses_server_message_or_fallback() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/bookings/1/approve");
            then.status(409)
                .json_body(json!({"message": "booking already approved"}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/bookings/2/approve");
            then.status(500).body("oops");
        });

        let h = signed_in(&server, "a1", "r1");
        let first = h.client.send(ApiRequest::post("/bookings/1/approve")).await;
        let second = h.client.send(ApiRequest::post("/bookings/2/approve")).await;

        assert!(first.is_err() && second.is_err());
        assert_eq!(
            h.hooks.toasts(),
            ["booking already approved", "Something went wrong"]
        );
    }

    #[tokio::test]
    async fn timeout_is_not_retried() {
        let server = MockServer::start_async().await;
        let slow = server.mock(|when, then| {
            when.method(GET).path("/settings");
            then.status(200).delay(Duration::from_millis(500));
        });

        let mut config = Config::new(&server.base_url());
        config.timeout = Duration::from_millis(50);
        let h = harness_with(config);

        let err = h.client.send(ApiRequest::get("/settings")).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
        slow.assert_hits(1);
        assert_eq!(h.hooks.toasts(), ["Something went wrong"]);
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let h = harness_with(Config::new("http://127.0.0.1:9/api"));
        let err = h.client.send(ApiRequest::get("/locks")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
        assert_eq!(h.hooks.toasts().len(), 1);
    }
}
