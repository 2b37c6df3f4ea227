use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiRequest, ApiResult, Client, Envelope, LoginData, TokenPair, REFRESH_PATH};

#[derive(Clone, Copy)]
pub struct Auth<'a> {
    pub(super) client: &'a Client,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct RegisterRequest {
    pub phone: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// `tenant` unless the backend is told otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iin: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset<'a> {
    pub phone: &'a str,
    pub code: &'a str,
    pub new_password: &'a str,
}

#[derive(Serialize)]
struct Phone<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct PhoneCode<'a> {
    phone: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct Refresh<'a> {
    refresh_token: &'a str,
}

impl Auth<'_> {
    /// `POST /auth/login`, doesn't touch the stored session.
    pub async fn login(&self, phone: &str, password: &str) -> ApiResult<Envelope<LoginData>> {
        let req = ApiRequest::post("/auth/login").json(&LoginRequest { phone, password })?;
        self.client.fetch(req).await
    }

    pub async fn register(&self, body: &RegisterRequest) -> ApiResult<Value> {
        let req = ApiRequest::post("/auth/register").json(body)?;
        self.client.send(req).await
    }

    /// `POST /auth/refresh`, the transport calls this on its own when a token expires.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<Envelope<TokenPair>> {
        let req = ApiRequest::post(REFRESH_PATH).json(&Refresh { refresh_token })?;
        self.client.fetch(req).await
    }

    pub async fn logout(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::post("/auth/logout")).await
    }

    pub async fn me(&self) -> ApiResult<Value> {
        self.client.send(ApiRequest::get("/auth/me")).await
    }

    pub async fn update_profile(&self, body: &ProfileUpdate) -> ApiResult<Value> {
        let req = ApiRequest::put("/auth/me").json(body)?;
        self.client.send(req).await
    }

    pub async fn change_password(&self, body: &PasswordChange<'_>) -> ApiResult<Value> {
        let req = ApiRequest::post("/auth/change-password").json(body)?;
        self.client.send(req).await
    }

    /// Ask for an sms code, used by registration and password reset.
    pub async fn send_code(&self, phone: &str) -> ApiResult<Value> {
        let req = ApiRequest::post("/auth/send-code").json(&Phone { phone })?;
        self.client.send(req).await
    }

    pub async fn verify_code(&self, phone: &str, code: &str) -> ApiResult<Value> {
        let req = ApiRequest::post("/auth/verify-code").json(&PhoneCode { phone, code })?;
        self.client.send(req).await
    }

    pub async fn reset_password(&self, body: &PasswordReset<'_>) -> ApiResult<Value> {
        let req = ApiRequest::post("/auth/reset-password").json(body)?;
        self.client.send(req).await
    }
}
