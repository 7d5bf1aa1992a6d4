use super::*;

#[test]
fn validate_credentials_trims_email_only() {
    assert_eq!(
        validate_credentials("  ada@example.com ", " secret "),
        Ok(("ada@example.com".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_email() {
    assert_eq!(validate_credentials("   ", "secret"), Err("Enter your email."));
}

#[test]
fn validate_credentials_requires_password() {
    assert_eq!(validate_credentials("ada@example.com", ""), Err("Enter your password."));
}

#[test]
fn sign_in_failed_message_wraps_backend_text() {
    assert_eq!(
        sign_in_failed_message("Invalid login credentials"),
        "Sign in failed: Invalid login credentials"
    );
}
