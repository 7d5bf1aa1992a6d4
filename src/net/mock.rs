//! In-memory `Backend` used by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;

use super::backend::{AuthCallback, AuthListeners, AuthSubscription, Backend};
use super::error::BackendError;
use super::types::{AuthEvent, ProfileRecord, ProfileRow, RoleRecord, Session, User};

/// Scriptable backend: credentials, role rows, and profile rows are seeded by
/// the test, and every write is recorded.
#[derive(Default)]
pub struct MockBackend {
    pub session: Mutex<Option<Session>>,
    pub listeners: AuthListeners,
    /// `email -> (password, user_id)`.
    pub accounts: HashMap<String, (String, String)>,
    /// `user_id -> role`, or an error to return for that id.
    pub roles: HashMap<String, Result<String, BackendError>>,
    pub profiles: Mutex<HashMap<String, ProfileRecord>>,
    pub profile_fetch_error: Option<BackendError>,
    pub upsert_error: Option<BackendError>,
    pub sign_out_error: Option<BackendError>,
    pub upserts: Mutex<Vec<ProfileRow>>,
    /// When set, `get_session` reads the session, then waits for a
    /// notification before answering, like a request still in flight.
    pub session_gate: Option<Arc<Notify>>,
}

impl MockBackend {
    #[must_use]
    pub fn with_account(mut self, email: &str, password: &str, user_id: &str) -> Self {
        self.accounts.insert(email.to_owned(), (password.to_owned(), user_id.to_owned()));
        self
    }

    #[must_use]
    pub fn with_role(mut self, user_id: &str, role: &str) -> Self {
        self.roles.insert(user_id.to_owned(), Ok(role.to_owned()));
        self
    }

    #[must_use]
    pub fn with_role_error(mut self, user_id: &str, error: BackendError) -> Self {
        self.roles.insert(user_id.to_owned(), Err(error));
        self
    }

    #[must_use]
    pub fn with_profile(self, user_id: &str, profile: ProfileRecord) -> Self {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.to_owned(), profile);
        self
    }

    pub fn recorded_upserts(&self) -> Vec<ProfileRow> {
        self.upserts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

pub fn session_for(user_id: &str, email: &str) -> Session {
    Session {
        access_token: format!("at-{user_id}"),
        refresh_token: format!("rt-{user_id}"),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        expires_at: None,
        user: User { id: user_id.to_owned(), email: Some(email.to_owned()) },
    }
}

impl Backend for MockBackend {
    async fn get_session(&self) -> Option<Session> {
        let snapshot = self.current_session();
        if let Some(gate) = &self.session_gate {
            gate.notified().await;
        }
        snapshot
    }

    fn on_auth_state_change(&self, callback: AuthCallback) -> AuthSubscription {
        self.listeners.subscribe(callback)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let Some((expected, user_id)) = self.accounts.get(email) else {
            return Err(BackendError::Auth("Invalid login credentials".to_owned()));
        };
        if expected != password {
            return Err(BackendError::Auth("Invalid login credentials".to_owned()));
        }
        let session = session_for(user_id, email);
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        self.listeners.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        if let Some(err) = &self.sign_out_error {
            return Err(err.clone());
        }
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    async fn fetch_role(&self, user_id: &str) -> Result<RoleRecord, BackendError> {
        match self.roles.get(user_id) {
            Some(Ok(role)) => Ok(RoleRecord { role: role.clone() }),
            Some(Err(err)) => Err(err.clone()),
            None => Err(BackendError::NotFound),
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<ProfileRecord, BackendError> {
        if let Some(err) = &self.profile_fetch_error {
            return Err(err.clone());
        }
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn upsert_profile(&self, row: &ProfileRow) -> Result<(), BackendError> {
        if let Some(err) = &self.upsert_error {
            return Err(err.clone());
        }
        self.upserts.lock().unwrap_or_else(PoisonError::into_inner).push(row.clone());
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(row.id.clone(), row.profile.clone());
        Ok(())
    }
}
