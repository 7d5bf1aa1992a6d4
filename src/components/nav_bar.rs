//! Top navigation: identity, page links, and sign-out.

use leptos::prelude::*;

use crate::components::auth_provider::use_auth;

/// Navigation bar shown while a user is signed in.
///
/// Signing out needs no navigation of its own: the `SignedOut` event clears
/// the user and the route guard redirects.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state;
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = auth.sign_out().await {
                    leptos::logging::error!("Error signing out: {e}");
                    error.set(Some(format!("Sign out failed: {e}")));
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &auth;
            busy.set(false);
        }
    };

    let identity = move || {
        state.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default())
    };

    view! {
        <Show when=move || state.with(|s| s.user.is_some())>
            <nav class="nav-bar">
                <a class="nav-bar__link" href="/profile">"Profile"</a>
                <Show when=move || state.with(|s| s.is_admin)>
                    <a class="nav-bar__link" href="/admin">"Admin"</a>
                </Show>
                <span class="nav-bar__spacer"></span>
                <span class="nav-bar__identity">{identity}</span>
                <button class="nav-bar__button" on:click=on_sign_out.clone() disabled=move || busy.get()>
                    "Sign out"
                </button>
            </nav>
            <Show when=move || error.get().is_some()>
                <p class="nav-bar__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </Show>
    }
}
