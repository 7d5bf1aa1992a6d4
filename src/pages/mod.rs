//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates auth decisions to
//! `components` and data rules to `state`.

pub mod admin;
pub mod login;
pub mod profile;
