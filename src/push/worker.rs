use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{NotificationData, NotificationSpec, PushId, PushPayload};

/// Reported in reply to `GET_VERSION`.
pub const WORKER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notification action that dismisses without opening anything.
pub const CLOSE_ACTION: &str = "close";

/// An open window of the web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
}

/// What the worker needs from the browser.
pub trait WorkerHost {
    /// Scheme, host and port of the app, without a trailing slash.
    fn origin(&self) -> &str;
    fn windows(&self) -> Vec<WindowClient>;
    fn show_notification(&self, notification: &NotificationSpec);
    fn focus_and_navigate(&self, window_id: &str, url: &str);
    fn open_window(&self, url: &str);
    fn post_message(&self, window_id: &str, message: &ClientMessage);
    /// Activates a waiting worker immediately.
    fn skip_waiting(&self);
}

/// Messages the page sends to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    SkipWaiting,
    GetVersion,
}

/// Messages the worker broadcasts to every open window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    NotificationClicked {
        #[serde(rename = "notificationId")]
        notification_id: PushId,
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<String>,
    },
    NotificationClosed {
        #[serde(rename = "notificationId")]
        notification_id: PushId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionReply {
    pub version: String,
}

/// Push, click, close and message handlers of the service worker.
pub struct NotificationWorker<H> {
    host: H,
}

impl<H: WorkerHost> NotificationWorker<H> {
    pub fn new(host: H) -> Self {
        NotificationWorker { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Shows the notification for a push message and returns what was shown.
    pub fn on_push(&self, data: Option<&[u8]>) -> NotificationSpec {
        let notification = PushPayload::parse(data).to_notification();
        log::debug!(
            "Showing notification {:?} linking to {}",
            notification.title,
            notification.data.url
        );
        self.host.show_notification(&notification);
        notification
    }

    pub fn on_click(&self, action: Option<&str>, data: &NotificationData) {
        if action == Some(CLOSE_ACTION) {
            return;
        }

        let origin = self.host.origin();
        let window = self
            .host
            .windows()
            .into_iter()
            .find(|w| same_origin(&w.url, origin));
        match window {
            Some(window) => self.host.focus_and_navigate(&window.id, &data.url),
            None => self.host.open_window(&data.url),
        }

        if let Some(id) = &data.notification_id {
            self.broadcast(&ClientMessage::NotificationClicked {
                notification_id: id.clone(),
                action: action.filter(|a| !a.is_empty()).map(str::to_string),
            });
        }
    }

    pub fn on_close(&self, data: &NotificationData) {
        if let Some(id) = &data.notification_id {
            self.broadcast(&ClientMessage::NotificationClosed {
                notification_id: id.clone(),
            });
        }
    }

    /// Handles a message posted by a page. Only `GET_VERSION` has a reply.
    pub fn on_message(&self, message: &Value) -> Option<VersionReply> {
        match WorkerMessage::deserialize(message) {
            Ok(WorkerMessage::SkipWaiting) => {
                self.host.skip_waiting();
                None
            }
            Ok(WorkerMessage::GetVersion) => Some(VersionReply {
                version: WORKER_VERSION.to_string(),
            }),
            Err(err) => {
                log::debug!("Ignoring worker message {}: {}", message, err);
                None
            }
        }
    }

    fn broadcast(&self, message: &ClientMessage) {
        for window in self.host.windows() {
            self.host.post_message(&window.id, message);
        }
    }
}

fn same_origin(url: &str, origin: &str) -> bool {
    match url.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Show(String),
        Focus(String, String),
        Open(String),
        Post(String, Value),
        SkipWaiting,
    }

    struct FakeHost {
        windows: Vec<WindowClient>,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeHost {
        fn with_windows(urls: &[&str]) -> FakeHost {
            let windows = urls
                .iter()
                .enumerate()
                .map(|(i, url)| WindowClient {
                    id: format!("w{}", i),
                    url: url.to_string(),
                })
                .collect();
            FakeHost {
                windows,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl WorkerHost for FakeHost {
        fn origin(&self) -> &str {
            "https://renti.kz"
        }
        fn windows(&self) -> Vec<WindowClient> {
            self.windows.clone()
        }
        fn show_notification(&self, notification: &NotificationSpec) {
            self.calls
                .borrow_mut()
                .push(Call::Show(notification.data.url.clone()));
        }
        fn focus_and_navigate(&self, window_id: &str, url: &str) {
            self.calls
                .borrow_mut()
                .push(Call::Focus(window_id.to_string(), url.to_string()));
        }
        fn open_window(&self, url: &str) {
            self.calls.borrow_mut().push(Call::Open(url.to_string()));
        }
        fn post_message(&self, window_id: &str, message: &ClientMessage) {
            let value = serde_json::to_value(message).unwrap();
            self.calls
                .borrow_mut()
                .push(Call::Post(window_id.to_string(), value));
        }
        fn skip_waiting(&self) {
            self.calls.borrow_mut().push(Call::SkipWaiting);
        }
    }

    fn data(url: &str, id: Option<i64>) -> NotificationData {
        NotificationData {
            url: url.to_string(),
            kind: None,
            notification_id: id.map(PushId::Number),
        }
    }

    #[test]
    fn push_shows_routed_notification() {
        let worker = NotificationWorker::new(FakeHost::with_windows(&[]));
        let body = json!({"type": "booking_approved", "booking_id": 42}).to_string();

        let shown = worker.on_push(Some(body.as_bytes()));

        assert_eq!(shown.data.url, "/bookings/42");
        assert_eq!(
            *worker.host().calls.borrow(),
            vec![Call::Show("/bookings/42".into())]
        );
    }

    #[test]
    fn malformed_push_still_shows_default() {
        let worker = NotificationWorker::new(FakeHost::with_windows(&[]));
        let shown = worker.on_push(Some(&b"\xff\xfe"[..]));
        assert_eq!(shown.title, "Renti.kz");
        assert_eq!(*worker.host().calls.borrow(), vec![Call::Show("/".into())]);
    }

    #[test]
    fn click_focuses_app_window_and_broadcasts() {
        let host = FakeHost::with_windows(&["https://other.kz/", "https://renti.kz/bookings"]);
        let worker = NotificationWorker::new(host);

        worker.on_click(Some("open"), &data("/bookings/42", Some(7)));

        let calls = worker.host().calls.borrow();
        assert_eq!(calls[0], Call::Focus("w1".into(), "/bookings/42".into()));
        let message = json!({"type": "NOTIFICATION_CLICKED", "notificationId": 7, "action": "open"});
        assert_eq!(calls[1], Call::Post("w0".into(), message.clone()));
        assert_eq!(calls[2], Call::Post("w1".into(), message));
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn click_opens_window_when_none_matches() {
        let host = FakeHost::with_windows(&["https://renti.kz.example.com/"]);
        let worker = NotificationWorker::new(host);

        worker.on_click(None, &data("/locks", None));

        assert_eq!(
            *worker.host().calls.borrow(),
            vec![Call::Open("/locks".into())]
        );
    }

    #[test]
    fn close_action_does_nothing() {
        let worker = NotificationWorker::new(FakeHost::with_windows(&["https://renti.kz/"]));
        worker.on_click(Some("close"), &data("/bookings/1", Some(3)));
        assert!(worker.host().calls.borrow().is_empty());
    }

    #[test]
    fn close_broadcasts_only_with_id() {
        let worker = NotificationWorker::new(FakeHost::with_windows(&["https://renti.kz/"]));

        worker.on_close(&data("/", None));
        assert!(worker.host().calls.borrow().is_empty());

        worker.on_close(&data("/", Some(11)));
        assert_eq!(
            *worker.host().calls.borrow(),
            vec![Call::Post(
                "w0".into(),
                json!({"type": "NOTIFICATION_CLOSED", "notificationId": 11})
            )]
        );
    }

    #[test]
    fn messages() {
        let worker = NotificationWorker::new(FakeHost::with_windows(&[]));

        assert_eq!(worker.on_message(&json!({"type": "SKIP_WAITING"})), None);
        assert_eq!(*worker.host().calls.borrow(), vec![Call::SkipWaiting]);

        let reply = worker.on_message(&json!({"type": "GET_VERSION"})).unwrap();
        assert_eq!(reply.version, WORKER_VERSION);

        assert_eq!(worker.on_message(&json!({"type": "PING"})), None);
        assert_eq!(worker.on_message(&json!("SKIP_WAITING")), None);
    }
}
