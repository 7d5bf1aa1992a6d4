//! Admin landing page, reachable only through the admin-only guard.

use leptos::prelude::*;

use crate::components::auth_provider::use_auth;

#[component]
pub fn AdminPage() -> impl IntoView {
    let state = use_auth().state;
    let identity = move || {
        state.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default())
    };
    let user_id = move || state.with(|s| s.user_id().unwrap_or_default().to_owned());

    view! {
        <div class="admin-page">
            <h1>"Admin Panel"</h1>
            <div class="admin-page__row">
                <span class="admin-page__label">"Signed in as"</span>
                <span class="admin-page__value">{identity}</span>
            </div>
            <div class="admin-page__row">
                <span class="admin-page__label">"User ID"</span>
                <span class="admin-page__value admin-page__value--mono">{user_id}</span>
            </div>
        </div>
    }
}
