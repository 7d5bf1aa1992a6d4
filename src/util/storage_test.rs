#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn load_json_is_none_outside_browser() {
    assert_eq!(load_json::<String>("sb-test-auth-token"), None);
}

#[test]
fn save_and_remove_are_noops_but_callable() {
    save_json("sb-test-auth-token", &"value");
    remove("sb-test-auth-token");
    assert_eq!(load_json::<String>("sb-test-auth-token"), None);
}
