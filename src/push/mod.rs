//! Service worker side of web push: turning push messages into
//! notifications and notification clicks into navigation.
//!
//! The browser is abstracted behind [`WorkerHost`].

mod payload;
pub use payload::{
    NotificationAction, NotificationData, NotificationSpec, PushId, PushPayload, DEFAULT_BODY,
    DEFAULT_ICON, DEFAULT_TAG, DEFAULT_TITLE, DEFAULT_URL,
};

mod worker;
pub use worker::{
    ClientMessage, NotificationWorker, VersionReply, WindowClient, WorkerHost, WorkerMessage,
    CLOSE_ACTION, WORKER_VERSION,
};
