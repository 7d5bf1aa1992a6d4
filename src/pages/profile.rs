//! Profile page: a controlled form bound to the user's `profiles` row.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `ProtectedRoute` at `/` and `/profile`. Loads the row when
//! the user id becomes known and upserts the whole record on submit.

use leptos::prelude::*;

use crate::components::auth_provider::use_auth;
use crate::state::profile::{FieldUpdate, ProfileField, ProfileForm};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state;
    let form = RwSignal::new(ProfileForm::default());
    let saving = RwSignal::new(false);

    // Rebind (and clear) the form whenever the user changes, then load.
    let load_backend = auth.backend();
    Effect::new(move || {
        let user_id = state.with(|s| s.user_id().map(str::to_owned));
        if form.with_untracked(|f| f.owner() == user_id.as_deref()) {
            return;
        }
        form.update(|f| {
            f.bind(user_id.as_deref());
        });
        let Some(id) = user_id else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            let backend = std::sync::Arc::clone(&load_backend);
            leptos::task::spawn_local(async move {
                let outcome = crate::state::profile::load_profile(backend.as_ref(), &id).await;
                let applied = form.try_update(|f| f.accept(&id, outcome)).unwrap_or(false);
                if !applied {
                    leptos::logging::log!("dropped profile load for {id}");
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&load_backend, id);
        }
    });

    let save_backend = auth.backend();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        // The record is only ever saved under the user it was loaded for.
        let Some((user_id, profile)) =
            form.with_untracked(|f| f.owner().map(|owner| (owner.to_owned(), f.record.clone())))
        else {
            return;
        };
        saving.set(true);

        #[cfg(feature = "csr")]
        {
            let backend = std::sync::Arc::clone(&save_backend);
            leptos::task::spawn_local(async move {
                let result = crate::state::profile::save_profile(backend.as_ref(), &user_id, &profile).await;
                crate::util::notice::alert(crate::state::profile::save_notice(&result));
                saving.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&save_backend, user_id, profile);
            saving.set(false);
        }
    };

    let inputs = ProfileField::ALL
        .into_iter()
        .map(|field| {
            view! {
                <div class="profile-form__row">
                    <label class="profile-form__label" for=field.input_name()>
                        {field.placeholder()}
                    </label>
                    <input
                        id=field.input_name()
                        class="profile-form__input"
                        type=field.input_type()
                        name=field.input_name()
                        placeholder=field.placeholder()
                        prop:value=move || form.with(|f| f.record.field(field).to_owned())
                        on:input=move |ev| {
                            form.update(|f| f.record.apply(FieldUpdate { field, value: event_target_value(&ev) }));
                        }
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="profile-page">
            <h1>"Profile Management"</h1>
            <form class="profile-form" on:submit=on_submit>
                {inputs}
                <button class="profile-form__submit" type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Update Profile" }}
                </button>
            </form>
        </div>
    }
}
