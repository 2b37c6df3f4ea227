//! Helpers for tests that talk to a mock server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use httpmock::MockServer;
use parking_lot::Mutex;

use super::hooks::UiHooks;
use super::model::TokenPair;
use super::storage::MemoryStorage;
use super::Client;
use crate::config::Config;

/// Remembers every toast and redirect instead of showing them.
#[derive(Default)]
pub(crate) struct RecordingHooks {
    toasts: Mutex<Vec<String>>,
    redirects: AtomicUsize,
}

impl RecordingHooks {
    pub(crate) fn toasts(&self) -> Vec<String> {
        self.toasts.lock().clone()
    }
    pub(crate) fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl UiHooks for RecordingHooks {
    fn toast_error(&self, message: &str) {
        self.toasts.lock().push(message.to_string());
    }
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) struct Harness {
    pub(crate) client: Client,
    pub(crate) hooks: Arc<RecordingHooks>,
}

pub(crate) fn harness_with(config: Config) -> Harness {
    let hooks = Arc::new(RecordingHooks::default());
    let client = Client::new(&config, Arc::new(MemoryStorage::new()), hooks.clone())
        .expect("client config is valid");
    Harness { client, hooks }
}

/// Anonymous client pointed at `server`.
pub(crate) fn harness(server: &MockServer) -> Harness {
    harness_with(Config::new(&server.base_url()))
}

/// Client pointed at `server` holding the given tokens.
pub(crate) fn signed_in(server: &MockServer, access: &str, refresh: &str) -> Harness {
    let h = harness(server);
    h.client.session().store(&TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    });
    h
}
