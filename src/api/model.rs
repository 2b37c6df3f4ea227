//! Response shapes shared by every endpoint family.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "success": true, "data": ..., "message": "..." }`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// List responses, `data` holds the page items.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Paginated<T = Value> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Some endpoints send only part of this, missing fields read as zero.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    #[serde(alias = "limit")]
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoginData {
    #[serde(flatten)]
    pub tokens: TokenPair,
    #[serde(default)]
    pub user: Option<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub count: u64,
}

/// Common paging parameters, `None` fields never reach the query string.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, page_size: u32) -> PageParams {
        PageParams {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}
