//! Auth context provider: session bootstrap, auth-event subscription, and the
//! `use_auth` accessor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once by `App` around the router. Everything below reads identity
//! through `use_auth()`; calling it outside this provider panics.

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::backend::Backend;
use crate::net::error::BackendError;
use crate::net::supabase::SupabaseClient;
use crate::state::auth::AuthState;

/// Auth surface shared with the component tree.
#[derive(Clone)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    backend: Arc<SupabaseClient>,
}

impl AuthContext {
    pub fn backend(&self) -> Arc<SupabaseClient> {
        Arc::clone(&self.backend)
    }

    /// Sign in with email + password. State follows through the auth event.
    ///
    /// # Errors
    ///
    /// Returns the backend failure so the caller can display it.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), BackendError> {
        self.backend.sign_in_with_password(email, password).await.map(|_| ())
    }

    /// # Errors
    ///
    /// Returns the backend failure so the caller can display it.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        self.backend.sign_out().await
    }
}

/// Fetch the auth context. Panics when called outside `AuthProvider`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Provides `AuthContext` to `children` and keeps it in sync with the backend.
#[component]
pub fn AuthProvider(backend: Arc<SupabaseClient>, children: Children) -> impl IntoView {
    let state = RwSignal::new(AuthState::loading());
    provide_context(AuthContext { state, backend: Arc::clone(&backend) });

    #[cfg(feature = "csr")]
    crate::state::auth::connect_auth(&backend, state, |task| leptos::task::spawn_local(task));
    #[cfg(not(feature = "csr"))]
    let _ = backend;

    children()
}
