mod client;
pub use client::Client;

mod error;
pub use error::{ApiError, ApiResult};

mod hooks;
pub use hooks::{LogHooks, UiHooks};

pub mod model;
pub use model::{Envelope, LoginData, PageParams, Paginated, Pagination, TokenPair, UnreadCount};

mod request;
pub use request::{query_pairs, ApiRequest, Body, FormField, Upload, LOGIN_PATH, REFRESH_PATH};

mod session;
pub use session::Session;

pub mod storage;
pub use storage::{FileStorage, MemoryStorage, TokenStorage};

#[cfg(test)]
pub(crate) mod testing;
