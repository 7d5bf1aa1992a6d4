//! Browser entry point: install panic/log hooks, read config, mount the app.

fn main() {
    #[cfg(feature = "csr")]
    {
        use leptos::prelude::*;
        use profile_portal::app::{App, ConfigErrorPage};
        use profile_portal::config::BackendConfig;
        use profile_portal::net::supabase::SupabaseClient;

        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);

        match BackendConfig::from_build_env() {
            Ok(config) => {
                let backend = std::sync::Arc::new(SupabaseClient::new(config));
                leptos::mount::mount_to_body(move || view! { <App backend=backend/> });
            }
            Err(e) => {
                leptos::logging::error!("{e}");
                let message = e.to_string();
                leptos::mount::mount_to_body(move || view! { <ConfigErrorPage message=message/> });
            }
        }
    }
}
