//! Blocking user notices.
//!
//! Uses `window.alert` in the browser; elsewhere the message goes to the log.

/// Show `message` to the user and block until it is acknowledged.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_ok() {
                return;
            }
        }
        leptos::logging::warn!("alert unavailable: {message}");
    }
    #[cfg(not(feature = "csr"))]
    {
        leptos::logging::log!("notice: {message}");
    }
}
