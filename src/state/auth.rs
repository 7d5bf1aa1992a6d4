//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held in an `RwSignal` by `AuthProvider` and read by route guards, the nav
//! bar, and the profile page.
//!
//! ORDERING
//! ========
//! Every identity change bumps `generation`. A role lookup carries the
//! generation it was started for and `apply_role` drops it if a newer
//! identity has arrived since, so overlapping sign-in/sign-out transitions can
//! never leave `is_admin` describing a previous user.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use leptos::prelude::{RwSignal, Update, WithUntracked, on_cleanup};

use crate::net::backend::Backend;
use crate::net::types::{AuthEvent, Session, User};

/// Authentication state tracking the current user and derived admin flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True only after the role lookup for the current user returned `"admin"`.
    pub is_admin: bool,
    /// True until the initial session lookup resolves.
    pub loading: bool,
    /// True while the role lookup for the current user is in flight.
    pub role_pending: bool,
    generation: u64,
}

impl AuthState {
    /// State before the initial session lookup has resolved.
    pub fn loading() -> Self {
        Self { loading: true, ..Self::default() }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Record a new identity from the session lookup or an auth event.
    ///
    /// Returns the generation a role lookup must carry, or `None` when the
    /// user id is unchanged (e.g. a token refresh) and no lookup is needed.
    /// Admin is revoked until the lookup for the new identity completes.
    pub fn begin_identity(&mut self, user: Option<User>) -> Option<u64> {
        let same_identity = !self.loading && self.user_id() == user.as_ref().map(|u| u.id.as_str());
        self.loading = false;
        if same_identity {
            self.user = user;
            return None;
        }

        self.generation += 1;
        self.role_pending = user.is_some();
        self.is_admin = false;
        self.user = user;
        Some(self.generation)
    }

    /// Apply a role lookup result. Returns `false` if the result is stale.
    pub fn apply_role(&mut self, generation: u64, is_admin: bool) -> bool {
        if generation != self.generation {
            return false;
        }
        self.is_admin = is_admin && self.user.is_some();
        self.role_pending = false;
        true
    }
}

/// Query the role record for `user_id`; anything but `"admin"` is `false`.
///
/// Lookup failures are logged and fail closed.
pub async fn resolve_admin<B: Backend>(backend: &B, user_id: &str) -> bool {
    match backend.fetch_role(user_id).await {
        Ok(record) => record.is_admin(),
        Err(e) => {
            leptos::logging::error!("Error fetching user role: {e}");
            false
        }
    }
}

// =============================================================================
// WIRING
// =============================================================================

/// Where identity transitions are written. `AuthProvider` uses an `RwSignal`.
pub trait AuthStore: Clone + Send + Sync + 'static {
    /// Read without subscribing. `None` once the store has been disposed.
    fn peek<R>(&self, f: impl FnOnce(&AuthState) -> R) -> Option<R>;
    fn modify<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> Option<R>;
}

impl AuthStore for RwSignal<AuthState> {
    fn peek<R>(&self, f: impl FnOnce(&AuthState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn modify<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[cfg(test)]
impl AuthStore for Arc<std::sync::Mutex<AuthState>> {
    fn peek<R>(&self, f: impl FnOnce(&AuthState) -> R) -> Option<R> {
        self.lock().ok().map(|state| f(&state))
    }

    fn modify<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> Option<R> {
        self.lock().ok().map(|mut state| f(&mut state))
    }
}

/// Runs a detached task: `spawn_local` in the browser.
pub type Spawn = fn(Pin<Box<dyn Future<Output = ()>>>);

/// Record `user` as the current identity right away and return the role
/// lookup that settles `is_admin`, or `None` when no lookup is needed.
pub fn track_identity<B, S>(
    store: S,
    backend: Arc<B>,
    user: Option<User>,
) -> Option<impl Future<Output = ()> + use<B, S>>
where
    B: Backend + 'static,
    S: AuthStore,
{
    let user_id = user.as_ref().map(|u| u.id.clone());
    let generation = store.modify(|s| s.begin_identity(user)).flatten()?;
    let user_id = user_id?;
    Some(async move {
        let is_admin = resolve_admin(backend.as_ref(), &user_id).await;
        if store.modify(|s| s.apply_role(generation, is_admin)) != Some(true) {
            leptos::logging::log!("discarded stale role lookup for {user_id}");
        }
    })
}

/// Resolve the stored session into `store`.
///
/// The generation is captured before the lookup starts; if an auth event has
/// settled the identity by the time it returns, the result is dropped.
pub fn bootstrap<B, S>(store: S, backend: Arc<B>) -> impl Future<Output = ()> + use<B, S>
where
    B: Backend + 'static,
    S: AuthStore,
{
    let started_at = store.peek(AuthState::generation);
    async move {
        let session = backend.get_session().await;
        if store.peek(AuthState::generation) != started_at {
            leptos::logging::log!("initial session lookup superseded by an auth event");
            return;
        }
        if let Some(lookup) = track_identity(store, backend, session.map(|s| s.user)) {
            lookup.await;
        }
    }
}

/// Keep `store` in sync with `backend` for the lifetime of the current
/// reactive owner.
///
/// Subscribes before the initial lookup so a refresh emitted by `get_session`
/// is not missed. The subscription is disposed when the owner is cleaned up.
pub fn connect_auth<B, S>(backend: &Arc<B>, store: S, spawn: Spawn)
where
    B: Backend + Send + Sync + 'static,
    S: AuthStore,
{
    let weak = Arc::downgrade(backend);
    let event_store = store.clone();
    let subscription = backend.on_auth_state_change(Box::new(move |event: AuthEvent, session: Option<&Session>| {
        leptos::logging::log!("auth event: {}", event.as_str());
        let Some(backend) = weak.upgrade() else {
            return;
        };
        if let Some(lookup) = track_identity(event_store.clone(), backend, session.map(|s| s.user.clone())) {
            spawn(Box::pin(lookup));
        }
    }));
    on_cleanup(move || subscription.dispose());

    spawn(Box::pin(bootstrap(store, Arc::clone(backend))));
}
