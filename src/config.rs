//! Backend connection settings baked in at build time.
//!
//! The browser bundle has no process environment, so the project URL and the
//! public anon key are captured from `SUPABASE_URL` / `SUPABASE_ANON_KEY`
//! when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Errors produced while validating backend settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was absent or blank at build time.
    #[error("missing backend setting: {var} not set")]
    Missing { var: &'static str },

    /// The project URL is not an absolute http(s) URL.
    #[error("invalid SUPABASE_URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without a trailing slash.
    pub url: String,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: String,
}

impl BackendConfig {
    /// Build config from the values captured at compile time.
    ///
    /// # Errors
    ///
    /// Returns an error if either setting is missing or the URL is malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    /// # Errors
    ///
    /// Returns an error if either value is missing/blank or the URL is not
    /// `http://` or `https://`.
    pub fn from_values(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = non_blank(url).ok_or(ConfigError::Missing { var: URL_VAR })?;
        let anon_key = non_blank(anon_key).ok_or(ConfigError::Missing { var: ANON_KEY_VAR })?;

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url.to_owned()));
        }
        let url = url.trim_end_matches('/');
        if url.split_once("://").is_none_or(|(_, host)| host.is_empty()) {
            return Err(ConfigError::InvalidUrl(url.to_owned()));
        }

        Ok(Self { url: url.to_owned(), anon_key: anon_key.to_owned() })
    }

    /// Endpoint under the auth service, e.g. `auth_url("token")`.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url)
    }

    /// PostgREST endpoint for `table`.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    /// `localStorage` key for the persisted session: `sb-<project-ref>-auth-token`,
    /// where the project ref is the first label of the host.
    pub fn storage_key(&self) -> String {
        let host = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        let host = host.split(['/', ':']).next().unwrap_or(host);
        let project_ref = host.split('.').next().unwrap_or(host);
        format!("sb-{project_ref}-auth-token")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
