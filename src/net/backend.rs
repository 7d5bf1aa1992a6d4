//! Backend seam consumed by auth state and the profile view.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SupabaseClient` is the browser implementation. Tests substitute
//! `net::mock::MockBackend`. Auth-state subscriptions live in `AuthListeners`
//! so every implementation shares the same dispose semantics.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::error::BackendError;
use super::types::{AuthEvent, ProfileRecord, ProfileRow, RoleRecord, Session};

/// Callback invoked with every auth-state transition.
pub type AuthCallback = Box<dyn Fn(AuthEvent, Option<&Session>) + Send + Sync>;

type SharedCallback = Arc<dyn Fn(AuthEvent, Option<&Session>) + Send + Sync>;

/// Remote auth + table operations the application depends on.
pub trait Backend {
    /// Current session, if any. Expired sessions are refreshed or cleared.
    async fn get_session(&self) -> Option<Session>;

    /// Register for auth-state transitions until the handle is disposed.
    fn on_auth_state_change(&self, callback: AuthCallback) -> AuthSubscription;

    /// # Errors
    ///
    /// Returns [`BackendError::Auth`] when the credentials are rejected.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// # Errors
    ///
    /// Returns an error if the auth service rejects the sign-out.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Look up the `user_roles` row for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the user has no role row.
    async fn fetch_role(&self, user_id: &str) -> Result<RoleRecord, BackendError>;

    /// Look up the `profiles` row whose id is `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when no row exists yet.
    async fn fetch_profile(&self, user_id: &str) -> Result<ProfileRecord, BackendError>;

    /// Insert or replace the whole profile row keyed by `row.id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected.
    async fn upsert_profile(&self, row: &ProfileRow) -> Result<(), BackendError>;
}

// =============================================================================
// AUTH LISTENERS
// =============================================================================

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    callbacks: Vec<(u64, SharedCallback)>,
}

/// Registry of auth-state subscribers.
#[derive(Clone, Default)]
pub struct AuthListeners {
    inner: Arc<Mutex<ListenerSet>>,
}

impl AuthListeners {
    pub fn subscribe(&self, callback: AuthCallback) -> AuthSubscription {
        let mut set = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        set.next_id += 1;
        let id = set.next_id;
        set.callbacks.push((id, Arc::from(callback)));
        AuthSubscription { id, set: Arc::downgrade(&self.inner) }
    }

    /// Deliver `event` to every live subscriber.
    ///
    /// Callbacks run outside the registry lock so they may subscribe or
    /// dispose re-entrantly.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let callbacks: Vec<SharedCallback> = {
            let set = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            set.callbacks.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in callbacks {
            callback(event, session);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by `on_auth_state_change`.
///
/// The callback stays registered until `dispose` is called or the handle is
/// dropped, whichever happens first. Consuming `dispose` makes a second
/// release impossible.
pub struct AuthSubscription {
    id: u64,
    set: Weak<Mutex<ListenerSet>>,
}

impl AuthSubscription {
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(set) = self.set.upgrade() {
            let mut set = set.lock().unwrap_or_else(PoisonError::into_inner);
            set.callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription").field("id", &self.id).finish_non_exhaustive()
    }
}
