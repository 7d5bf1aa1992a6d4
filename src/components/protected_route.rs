//! Route guard gating subtrees on sign-in and the admin role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps `/`, `/profile`, and `/admin` in `App`. While identity or the admin
//! role is still resolving, only a placeholder renders, never the children.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::auth_provider::use_auth;
use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity or role lookup still in flight.
    Pending,
    Allow,
    Redirect(&'static str),
}

/// Decide whether a guarded route may render for `state`.
pub fn guard_decision(state: &AuthState, admin_only: bool) -> GuardDecision {
    if state.loading {
        return GuardDecision::Pending;
    }
    if state.user.is_none() {
        return GuardDecision::Redirect(LOGIN_PATH);
    }
    if admin_only {
        if state.role_pending {
            return GuardDecision::Pending;
        }
        if !state.is_admin {
            return GuardDecision::Redirect(LOGIN_PATH);
        }
    }
    GuardDecision::Allow
}

/// Render `children` only when `guard_decision` allows it; otherwise redirect.
#[component]
pub fn ProtectedRoute(#[prop(optional)] admin_only: bool, children: ChildrenFn) -> impl IntoView {
    let state = use_auth().state;
    let navigate = use_navigate();
    let decision = Memo::new(move |_| state.with(|s| guard_decision(s, admin_only)));

    Effect::new(move || {
        if let GuardDecision::Redirect(path) = decision.get() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Allow
            fallback=move || {
                view! {
                    <div class="guard-placeholder">
                        <p>
                            {move || {
                                if decision.get() == GuardDecision::Pending {
                                    "Loading..."
                                } else {
                                    "Redirecting..."
                                }
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
