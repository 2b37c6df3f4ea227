//! Owned description of a single API call.
//!
//! Requests are plain values so the transport can send the same call a second
//! time after refreshing the session.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::{ApiError, ApiResult};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base url, always starting with `/`
    pub path: String,
    /// Already flattened query parameters
    pub query: Vec<(String, String)>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: String, value: String },
    File(Upload),
}

/// A file to send as part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Form field name, e.g. `photos`
    pub field: String,
    pub file_name: String,
    /// `None` lets the server sniff the type
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Upload {
        Upload {
            field: field.into(),
            file_name: file_name.into(),
            mime: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Upload {
        self.mime = Some(mime.into());
        self
    }
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> ApiRequest {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        ApiRequest {
            method,
            path,
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> ApiRequest {
        Self::new(Method::GET, path)
    }
    pub fn post(path: impl Into<String>) -> ApiRequest {
        Self::new(Method::POST, path)
    }
    pub fn put(path: impl Into<String>) -> ApiRequest {
        Self::new(Method::PUT, path)
    }
    pub fn patch(path: impl Into<String>) -> ApiRequest {
        Self::new(Method::PATCH, path)
    }
    pub fn delete(path: impl Into<String>) -> ApiRequest {
        Self::new(Method::DELETE, path)
    }

    /// Append query parameters taken from any serializable map or struct.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> ApiResult<ApiRequest> {
        self.query.extend(query_pairs(params)?);
        Ok(self)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<ApiRequest> {
        self.body = Body::Json(serde_json::to_value(body).map_err(ApiError::encode)?);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> ApiRequest {
        self.body = Body::Multipart(fields);
        self
    }

    /// Shorthand for a multipart body made only of files.
    pub fn uploads(self, uploads: Vec<Upload>) -> ApiRequest {
        self.multipart(uploads.into_iter().map(FormField::File).collect())
    }

    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }
}

impl Body {
    /// Build a fresh multipart form, forms can't be reused between sends.
    pub(crate) fn to_form(fields: &[FormField]) -> ApiResult<Form> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name.clone(), value.clone()),
                FormField::File(upload) => {
                    let mut part =
                        Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
                    if let Some(mime) = upload.mime.as_deref() {
                        part = part.mime_str(mime).map_err(|err| {
                            ApiError::Upload(format!("{}: {}", upload.file_name, err))
                        })?;
                    }
                    form.part(upload.field.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Flatten a serializable value into query pairs.
///
/// `null` values are skipped, arrays repeat their key and nested objects are
/// sent as json text. Keys come out sorted.
pub fn query_pairs<Q: Serialize + ?Sized>(params: &Q) -> ApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(ApiError::encode)?;
    let mut pairs = Vec::new();

    let Value::Object(map) = value else {
        return Ok(pairs);
    };

    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key, text));
                }
            }
        }
    }

    Ok(pairs)
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}
