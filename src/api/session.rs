//! Session credentials and the single in-flight token refresh.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use super::error::ApiResult;
use super::model::TokenPair;
use super::storage::{TokenStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

pub(crate) type RefreshOutcome = ApiResult<TokenPair>;
pub(crate) type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Owns every read and write of the token pair.
pub struct Session {
    storage: Arc<dyn TokenStorage>,
    /// Refresh currently running, every request that hits a 401 awaits this one
    pending: Mutex<Option<PendingRefresh>>,
}

impl Session {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Session {
        Session {
            storage,
            pending: Mutex::new(None),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some() && self.refresh_token().is_some()
    }

    /// Persist a new token pair, replacing both values.
    pub fn store(&self, tokens: &TokenPair) {
        let stored = self
            .storage
            .set(ACCESS_TOKEN_KEY, &tokens.access_token)
            .and_then(|_| self.storage.set(REFRESH_TOKEN_KEY, &tokens.refresh_token));

        if let Err(err) = stored {
            log::warn!("couldn't persist tokens, dropping session: {:?}", err);
            self.clear();
        }
    }

    /// Forget both tokens.
    pub fn clear(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(err) = self.storage.remove(key) {
                log::warn!("couldn't remove {} from storage: {:?}", key, err);
            }
        }
    }

    /// Join the refresh in flight, or start a new one with `start`.
    ///
    /// A refresh that already resolved is never handed out again.
    pub(crate) fn join_refresh<F>(&self, start: F) -> PendingRefresh
    where
        F: FnOnce() -> BoxFuture<'static, RefreshOutcome>,
    {
        let mut pending = self.pending.lock();
        if let Some(refresh) = pending.as_ref() {
            if refresh.peek().is_none() {
                return refresh.clone();
            }
        }

        let refresh = start().shared();
        *pending = Some(refresh.clone());
        refresh
    }

    /// Release the slot once `refresh` resolved, unless a newer one took it.
    pub(crate) fn finish_refresh(&self, refresh: &PendingRefresh) {
        let mut pending = self.pending.lock();
        if pending.as_ref().is_some_and(|p| p.ptr_eq(refresh)) {
            *pending = None;
        }
    }
}
