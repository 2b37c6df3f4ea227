//! Client for the Renti.kz rental REST API.
//!
//! [`Client`] owns the transport: bearer tokens, a single shared refresh on
//! `401` and error toasts through [`UiHooks`]. The typed endpoint namespaces
//! live in [`resources`] and hang off the client, e.g. `client.bookings()`.

pub mod api;
pub use api::{
    ApiError, ApiResult, Client, FileStorage, LogHooks, MemoryStorage, TokenStorage, UiHooks,
};

pub mod config;
pub use config::Config;

pub mod logger;

pub mod push;

pub mod resources;
pub use resources::{AssignmentReport, Id};
