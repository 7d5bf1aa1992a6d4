//! Root application component with routing and the auth context provider.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::components::nav_bar::NavBar;
use crate::components::protected_route::ProtectedRoute;
use crate::net::supabase::SupabaseClient;
use crate::pages::{admin::AdminPage, login::LoginPage, profile::ProfilePage};

/// Root application component.
///
/// `/login` is public; `/` and `/profile` need a user; `/admin` needs the
/// admin role.
#[component]
pub fn App(backend: Arc<SupabaseClient>) -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Profile Portal"/>

        <AuthProvider backend=backend>
            <Router>
                <main class="app-shell">
                    <NavBar/>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route
                            path=StaticSegment("profile")
                            view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                        />
                        <Route
                            path=StaticSegment("admin")
                            view=|| view! { <ProtectedRoute admin_only=true><AdminPage/></ProtectedRoute> }
                        />
                        <Route
                            path=StaticSegment("")
                            view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                        />
                    </Routes>
                </main>
            </Router>
        </AuthProvider>
    }
}

/// Shown instead of the router when backend settings are missing.
#[component]
pub fn ConfigErrorPage(message: String) -> impl IntoView {
    view! {
        <main class="app-shell">
            <div class="config-error">
                <h1>"Configuration error"</h1>
                <p>{message}</p>
            </div>
        </main>
    }
}
