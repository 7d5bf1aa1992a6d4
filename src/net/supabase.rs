//! REST client for the managed backend (GoTrue auth + PostgREST tables).
//!
//! Browser builds (`csr`): real HTTP calls via `gloo-net`, session persisted
//! in `localStorage`. Native builds: every remote call returns
//! `BackendError::Unavailable` so the session bookkeeping stays testable.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses are classified by `BackendError::from_response`.
//! Auth endpoint rejections become `BackendError::Auth` so the login form can
//! show the service's message verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{AuthCallback, AuthListeners, AuthSubscription, Backend};
use super::error::BackendError;
use super::types::{
    AuthEvent, PROFILES_TABLE, ProfileRecord, ProfileRow, RoleRecord, Session, USER_ROLES_TABLE,
};
use crate::config::BackendConfig;
use crate::util::{clock, storage};

/// `Accept` value asking PostgREST for exactly one object instead of an array.
pub const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";
/// `Prefer` value turning a POST into an upsert on the primary key.
pub const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Query pairs for `select=<columns>&<column>=eq.<value>`.
fn select_query(columns: &str, column: &str, value: &str) -> [(String, String); 2] {
    [("select".to_owned(), columns.to_owned()), (column.to_owned(), format!("eq.{value}"))]
}

/// Logout rejections meaning the server-side session is already gone.
fn session_already_ended(err: &BackendError) -> bool {
    matches!(err, BackendError::Api { status: 401 | 403 | 404, .. })
}

pub struct SupabaseClient {
    config: BackendConfig,
    session: Mutex<Option<Session>>,
    listeners: AuthListeners,
}

impl SupabaseClient {
    /// Create a client, restoring any session persisted by a previous visit.
    pub fn new(config: BackendConfig) -> Self {
        let session = storage::load_json::<Session>(&config.storage_key());
        Self { config, session: Mutex::new(session), listeners: AuthListeners::default() }
    }

    fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store_session(&self, session: Option<Session>) {
        let key = self.config.storage_key();
        match &session {
            Some(s) => storage::save_json(&key, s),
            None => storage::remove(&key),
        }
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Token for table requests: the user's access token, else the anon key.
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    async fn bearer_token(&self) -> String {
        self.get_session()
            .await
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token)
    }

    /// `table.select(columns).eq(column, value).single()`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when no row matches, or another
    /// variant when the request fails or the row does not decode as `T`.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        column: &str,
        value: &str,
    ) -> Result<T, BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.rest_url(table);
            let bearer = format!("Bearer {}", self.bearer_token().await);
            log::debug!("GET {url} ({column}={value})");
            let query = select_query(columns, column, value);
            let request = gloo_net::http::Request::get(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &bearer)
                .header("Accept", SINGLE_OBJECT_ACCEPT)
                .query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .build()
                .map_err(|e| BackendError::Network(e.to_string()))?;
            let response = dispatch(request).await?;
            response.json::<T>().await.map_err(|e| BackendError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (table, select_query(columns, column, value));
            Err(BackendError::Unavailable)
        }
    }

    /// `table.upsert(row)` keyed on the table's primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the row.
    pub async fn upsert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.rest_url(table);
            let bearer = format!("Bearer {}", self.bearer_token().await);
            log::debug!("POST {url} (upsert)");
            let request = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &bearer)
                .header("Prefer", UPSERT_PREFER)
                .json(row)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            dispatch(request).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (table, row);
            Err(BackendError::Unavailable)
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.auth_url("token?grant_type=refresh_token");
            log::debug!("POST {url}");
            let request = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .json(&RefreshGrant { refresh_token })
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            let response = dispatch(request).await.map_err(BackendError::into_auth)?;
            let session: Session = response.json().await.map_err(|e| BackendError::Decode(e.to_string()))?;
            Ok(session.with_expiry_from(clock::now_secs()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = refresh_token;
            Err(BackendError::Unavailable)
        }
    }

    async fn revoke(&self, access_token: &str) -> Result<(), BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.auth_url("logout");
            log::debug!("POST {url}");
            let request = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {access_token}"))
                .build()
                .map_err(|e| BackendError::Network(e.to_string()))?;
            dispatch(request).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = access_token;
            Err(BackendError::Unavailable)
        }
    }
}

impl Backend for SupabaseClient {
    async fn get_session(&self) -> Option<Session> {
        let session = self.current_session()?;
        if !session.is_expired(clock::now_secs()) {
            return Some(session);
        }
        match self.refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.store_session(Some(fresh.clone()));
                self.listeners.emit(AuthEvent::TokenRefreshed, Some(&fresh));
                Some(fresh)
            }
            Err(e) => {
                leptos::logging::warn!("session refresh failed: {e}");
                self.store_session(None);
                self.listeners.emit(AuthEvent::SignedOut, None);
                None
            }
        }
    }

    fn on_auth_state_change(&self, callback: AuthCallback) -> AuthSubscription {
        self.listeners.subscribe(callback)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.auth_url("token?grant_type=password");
            log::debug!("POST {url}");
            let request = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .json(&PasswordGrant { email, password })
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            let response = dispatch(request).await.map_err(BackendError::into_auth)?;
            let session: Session = response.json().await.map_err(|e| BackendError::Decode(e.to_string()))?;
            let session = session.with_expiry_from(clock::now_secs());
            self.store_session(Some(session.clone()));
            self.listeners.emit(AuthEvent::SignedIn, Some(&session));
            Ok(session)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(BackendError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        if let Some(session) = self.current_session() {
            match self.revoke(&session.access_token).await {
                Ok(()) => {}
                Err(e) if session_already_ended(&e) => {
                    leptos::logging::log!("logout: session already ended ({e})");
                }
                Err(e) => return Err(e),
            }
        }
        self.store_session(None);
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    async fn fetch_role(&self, user_id: &str) -> Result<RoleRecord, BackendError> {
        self.select_single(USER_ROLES_TABLE, "role", "user_id", user_id).await
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<ProfileRecord, BackendError> {
        self.select_single(PROFILES_TABLE, "*", "id", user_id).await
    }

    async fn upsert_profile(&self, row: &ProfileRow) -> Result<(), BackendError> {
        self.upsert(PROFILES_TABLE, row).await
    }
}

/// Send `request` and turn non-2xx responses into `BackendError`.
#[cfg(feature = "csr")]
async fn dispatch(request: gloo_net::http::Request) -> Result<gloo_net::http::Response, BackendError> {
    let response = request
        .send()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::from_response(status, &body))
}
