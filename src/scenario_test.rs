//! End-to-end flows across auth wiring, the route guard, and the profile
//! form, with `MockBackend` standing in for the remote services.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use leptos::prelude::Owner;
use tokio::task::LocalSet;

use crate::components::protected_route::{GuardDecision, LOGIN_PATH, guard_decision};
use crate::net::backend::Backend;
use crate::net::error::BackendError;
use crate::net::mock::MockBackend;
use crate::net::types::{ProfileRecord, SocialLinks};
use crate::state::auth::{AuthState, connect_auth};
use crate::state::profile::{FieldUpdate, ProfileField, ProfileForm, load_profile, save_profile};

fn member_profile() -> ProfileRecord {
    ProfileRecord {
        name: "Mary Member".to_owned(),
        profession: "Engineer".to_owned(),
        phone: "555-0123".to_owned(),
        image_url: String::new(),
        social_links: SocialLinks { github: "https://github.example/mary".to_owned(), ..SocialLinks::default() },
    }
}

fn spawn_task(task: Pin<Box<dyn Future<Output = ()>>>) {
    tokio::task::spawn_local(task);
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Connects a fresh auth store to `backend` and lets the initial lookup finish.
async fn mount(owner: &Owner, backend: &Arc<MockBackend>) -> Arc<Mutex<AuthState>> {
    let store = Arc::new(Mutex::new(AuthState::loading()));
    owner.with(|| connect_auth(backend, Arc::clone(&store), spawn_task));
    settle().await;
    store
}

fn snapshot(store: &Arc<Mutex<AuthState>>) -> AuthState {
    store.lock().unwrap().clone()
}

#[tokio::test]
async fn member_sign_in_redirects_admin_and_prefills_profile() {
    let backend = Arc::new(
        MockBackend::default()
            .with_account("mary@example.com", "hunter2", "member-1")
            .with_role("member-1", "member")
            .with_profile("member-1", member_profile()),
    );
    let owner = Owner::new();

    LocalSet::new()
        .run_until(async {
            let store = mount(&owner, &backend).await;
            assert_eq!(guard_decision(&snapshot(&store), false), GuardDecision::Redirect(LOGIN_PATH));

            backend.sign_in_with_password("mary@example.com", "hunter2").await.unwrap();
            settle().await;
            let state = snapshot(&store);

            assert!(!state.is_admin);
            assert_eq!(guard_decision(&state, true), GuardDecision::Redirect(LOGIN_PATH));
            assert_eq!(guard_decision(&state, false), GuardDecision::Allow);

            let mut form = ProfileForm::default();
            form.bind(state.user_id());
            form.accept("member-1", load_profile(backend.as_ref(), "member-1").await);
            assert_eq!(form.record, member_profile());
        })
        .await;
}

#[tokio::test]
async fn admin_sign_in_opens_admin_route() {
    let backend = Arc::new(
        MockBackend::default()
            .with_account("root@example.com", "pw", "admin-1")
            .with_role("admin-1", "admin"),
    );
    let owner = Owner::new();

    LocalSet::new()
        .run_until(async {
            let store = mount(&owner, &backend).await;
            backend.sign_in_with_password("root@example.com", "pw").await.unwrap();
            settle().await;

            let state = snapshot(&store);
            assert!(state.is_admin);
            assert_eq!(guard_decision(&state, true), GuardDecision::Allow);
        })
        .await;
}

#[tokio::test]
async fn admin_route_waits_for_role_lookup() {
    let backend = Arc::new(
        MockBackend::default()
            .with_account("root@example.com", "pw", "admin-1")
            .with_role("admin-1", "admin"),
    );
    let owner = Owner::new();

    LocalSet::new()
        .run_until(async {
            let store = mount(&owner, &backend).await;
            // No settle: the role lookup has been spawned but not run.
            backend.sign_in_with_password("root@example.com", "pw").await.unwrap();
            assert_eq!(guard_decision(&snapshot(&store), true), GuardDecision::Pending);

            settle().await;
            assert_eq!(guard_decision(&snapshot(&store), true), GuardDecision::Allow);
        })
        .await;
}

#[tokio::test]
async fn sign_out_revokes_access_everywhere() {
    let backend = Arc::new(
        MockBackend::default()
            .with_account("root@example.com", "pw", "admin-1")
            .with_role("admin-1", "admin"),
    );
    let owner = Owner::new();

    LocalSet::new()
        .run_until(async {
            let store = mount(&owner, &backend).await;
            backend.sign_in_with_password("root@example.com", "pw").await.unwrap();
            settle().await;
            assert!(snapshot(&store).is_admin);

            backend.sign_out().await.unwrap();
            settle().await;
            let state = snapshot(&store);

            assert!(!state.is_admin);
            assert_eq!(guard_decision(&state, true), GuardDecision::Redirect(LOGIN_PATH));
            assert_eq!(guard_decision(&state, false), GuardDecision::Redirect(LOGIN_PATH));
        })
        .await;
}

#[tokio::test]
async fn bad_credentials_propagate_to_caller() {
    let backend = Arc::new(MockBackend::default().with_account("mary@example.com", "hunter2", "member-1"));
    let owner = Owner::new();

    LocalSet::new()
        .run_until(async {
            let store = mount(&owner, &backend).await;
            let result = backend.sign_in_with_password("mary@example.com", "wrong").await;
            settle().await;

            assert_eq!(result, Err(BackendError::Auth("Invalid login credentials".to_owned())));
            assert!(snapshot(&store).user.is_none());
            assert!(backend.current_session().is_none());
        })
        .await;
}

#[tokio::test]
async fn sign_out_failure_propagates_and_keeps_identity() {
    let backend = MockBackend {
        sign_out_error: Some(BackendError::Network("offline".to_owned())),
        ..MockBackend::default()
    }
    .with_account("mary@example.com", "hunter2", "member-1");
    backend.sign_in_with_password("mary@example.com", "hunter2").await.unwrap();

    assert_eq!(backend.sign_out().await, Err(BackendError::Network("offline".to_owned())));
    assert!(backend.current_session().is_some());
}

#[tokio::test]
async fn first_save_for_new_user_creates_row() {
    let backend = MockBackend::default().with_account("ada@example.com", "pw", "ada-1");
    let session = backend.sign_in_with_password("ada@example.com", "pw").await.unwrap();

    let mut form = ProfileForm::default();
    form.bind(Some(session.user.id.as_str()));
    form.accept(&session.user.id, load_profile(&backend, &session.user.id).await);
    assert_eq!(form.record, ProfileRecord::default());

    form.record.apply(FieldUpdate { field: ProfileField::Name, value: "Ada Lovelace".to_owned() });
    save_profile(&backend, &session.user.id, &form.record).await.unwrap();

    let mut reloaded = ProfileRecord::default();
    load_profile(&backend, &session.user.id).await.apply_to(&mut reloaded);
    assert_eq!(reloaded.name, "Ada Lovelace");
    assert_eq!(reloaded.social_links, SocialLinks::default());
}
