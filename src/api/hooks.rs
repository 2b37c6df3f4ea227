/// User facing side effects the transport triggers on failures.
pub trait UiHooks: Send + Sync {
    /// Show a short lived error message.
    fn toast_error(&self, message: &str);
    /// Leave the current view and go to the login route.
    fn redirect_to_login(&self);
}

/// Writes toasts and redirects to the log, used when nothing renders them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHooks;

impl UiHooks for LogHooks {
    fn toast_error(&self, message: &str) {
        log::warn!("{}", message);
    }
    fn redirect_to_login(&self) {
        log::warn!("session expired, please log in again");
    }
}
