//! Persistence for the signed-in session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SupabaseClient` writes the session under the project's storage key after
//! sign-in and refresh, reads it once at startup, and removes it on sign-out.
//! Values are JSON so a stored session survives a reload. A missing window,
//! a disabled `localStorage`, or an unreadable entry all read as "no session".
//! Outside the browser every helper is a no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read and decode the entry under `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                leptos::logging::warn!("ignoring unreadable stored entry {key}: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Encode `value` and store it under `key`, replacing any previous entry.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let written = serde_json::to_string(value)
            .ok()
            .zip(local_storage())
            .is_some_and(|(raw, storage)| storage.set_item(key, &raw).is_ok());
        if !written {
            leptos::logging::warn!("could not persist {key}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

pub fn remove(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}
