use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_TITLE: &str = "Renti.kz";
pub const DEFAULT_BODY: &str = "You have a new notification";
pub const DEFAULT_URL: &str = "/";
pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
pub const DEFAULT_TAG: &str = "renti-notification";

const BOOKING_TYPES: &[&str] = &[
    "booking_created",
    "booking_approved",
    "booking_rejected",
    "booking_cancelled",
    "booking_finished",
    "booking_extended",
    "booking_reminder",
    "checkin_reminder",
    "checkout_reminder",
];

const APARTMENT_TYPES: &[&str] = &[
    "apartment_approved",
    "apartment_rejected",
    "apartment_blocked",
    "apartment_review",
];

/// Record id as sent by the backend, which uses both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PushId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushId::Number(n) => write!(f, "{}", n),
            PushId::Text(s) => f.write_str(s),
        }
    }
}

/// JSON body of a web push message.
#[derive(Debug, Clone, Default)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub tag: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub booking_id: Option<PushId>,
    pub apartment_id: Option<PushId>,
    pub notification_id: Option<PushId>,
    /// Set when there was no usable data at all.
    fallback: bool,
}

impl PushPayload {
    /// Parses the raw push data. Missing or malformed data yields the defaults.
    ///
    /// Fields are read one by one, a field of the wrong type counts as absent
    /// and does not discard the rest.
    pub fn parse(data: Option<&[u8]>) -> PushPayload {
        let data = match data {
            Some(data) if !data.is_empty() => data,
            _ => return PushPayload::fallback(),
        };
        match serde_json::from_slice::<Value>(data) {
            Ok(value @ Value::Object(_)) => PushPayload::from_value(&value),
            Ok(value) => {
                log::warn!("Ignoring push payload that is not an object: {}", value);
                PushPayload::fallback()
            }
            Err(err) => {
                log::warn!("Ignoring malformed push payload: {}", err);
                PushPayload::fallback()
            }
        }
    }

    fn from_value(value: &Value) -> PushPayload {
        PushPayload {
            title: text(value, "title"),
            body: text(value, "body"),
            icon: text(value, "icon"),
            tag: text(value, "tag"),
            kind: text(value, "type"),
            priority: text(value, "priority"),
            booking_id: id(value, "booking_id"),
            apartment_id: id(value, "apartment_id"),
            notification_id: id(value, "notification_id"),
            fallback: false,
        }
    }

    fn fallback() -> PushPayload {
        PushPayload {
            fallback: true,
            ..PushPayload::default()
        }
    }

    /// Page the notification leads to.
    ///
    /// Only missing or malformed data opens the root page. Known types
    /// without their id open the matching list page, anything else opens
    /// the notification list.
    pub fn target_url(&self) -> String {
        if self.fallback {
            return DEFAULT_URL.to_string();
        }
        let kind = self.kind.as_deref().unwrap_or_default();

        if BOOKING_TYPES.contains(&kind) {
            return detail_url("/bookings", self.booking_id.as_ref());
        }
        if APARTMENT_TYPES.contains(&kind) {
            return detail_url("/apartments", self.apartment_id.as_ref());
        }
        match kind {
            "payment_required" => "/payments".to_string(),
            "password_ready" => "/locks".to_string(),
            _ => "/notifications".to_string(),
        }
    }

    pub fn requires_interaction(&self) -> bool {
        self.priority.as_deref() == Some("high")
    }

    /// Everything needed to show the notification.
    pub fn to_notification(&self) -> NotificationSpec {
        NotificationSpec {
            title: non_blank(&self.title).unwrap_or(DEFAULT_TITLE).to_string(),
            body: non_blank(&self.body).unwrap_or(DEFAULT_BODY).to_string(),
            icon: non_blank(&self.icon).unwrap_or(DEFAULT_ICON).to_string(),
            tag: non_blank(&self.tag).unwrap_or(DEFAULT_TAG).to_string(),
            require_interaction: self.requires_interaction(),
            actions: vec![
                NotificationAction::new("open", "Open"),
                NotificationAction::new("close", "Close"),
            ],
            data: NotificationData {
                url: self.target_url(),
                kind: self.kind.clone(),
                notification_id: self.notification_id.clone(),
            },
        }
    }
}

fn detail_url(list: &str, id: Option<&PushId>) -> String {
    match id {
        Some(id) => format!("{}/{}", list, id),
        None => list.to_string(),
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numbers and non-blank strings, anything else counts as absent.
fn id(value: &Value, key: &str) -> Option<PushId> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().map(PushId::Number),
        Value::String(s) if !s.trim().is_empty() => Some(PushId::Text(s.clone())),
        _ => None,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Options for showing a notification, in the shape the browser expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSpec {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub tag: String,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
    pub data: NotificationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

impl NotificationAction {
    fn new(action: &str, title: &str) -> NotificationAction {
        NotificationAction {
            action: action.to_string(),
            title: title.to_string(),
        }
    }
}

/// Attached to a shown notification and handed back on click and close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub url: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<PushId>,
}

impl Default for NotificationData {
    fn default() -> Self {
        NotificationData {
            url: DEFAULT_URL.to_string(),
            kind: None,
            notification_id: None,
        }
    }
}
