use super::*;

fn config() -> BackendConfig {
    BackendConfig::from_values(Some("https://abcd1234.supabase.co/"), Some("anon-key")).unwrap()
}

#[test]
fn from_values_trims_trailing_slash() {
    let cfg = config();
    assert_eq!(cfg.url, "https://abcd1234.supabase.co");
    assert_eq!(cfg.anon_key, "anon-key");
}

#[test]
fn from_values_requires_both_settings() {
    assert_eq!(
        BackendConfig::from_values(None, Some("k")),
        Err(ConfigError::Missing { var: URL_VAR })
    );
    assert_eq!(
        BackendConfig::from_values(Some("https://x.supabase.co"), Some("   ")),
        Err(ConfigError::Missing { var: ANON_KEY_VAR })
    );
}

#[test]
fn from_values_rejects_non_http_urls() {
    assert_eq!(
        BackendConfig::from_values(Some("abcd.supabase.co"), Some("k")),
        Err(ConfigError::InvalidUrl("abcd.supabase.co".to_owned()))
    );
    assert!(matches!(
        BackendConfig::from_values(Some("https:///"), Some("k")),
        Err(ConfigError::InvalidUrl(_))
    ));
}

#[test]
fn endpoints_are_joined_under_project_url() {
    let cfg = config();
    assert_eq!(cfg.auth_url("token"), "https://abcd1234.supabase.co/auth/v1/token");
    assert_eq!(cfg.rest_url("profiles"), "https://abcd1234.supabase.co/rest/v1/profiles");
}

#[test]
fn storage_key_uses_project_ref() {
    assert_eq!(config().storage_key(), "sb-abcd1234-auth-token");
    let local = BackendConfig::from_values(Some("http://localhost:54321"), Some("k")).unwrap();
    assert_eq!(local.storage_key(), "sb-localhost-auth-token");
}

#[test]
fn config_error_messages_name_the_variable() {
    assert_eq!(
        ConfigError::Missing { var: URL_VAR }.to_string(),
        "missing backend setting: SUPABASE_URL not set"
    );
    assert_eq!(ConfigError::InvalidUrl("x".to_owned()).to_string(), "invalid SUPABASE_URL: x");
}
