//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components provide and consume the auth context shared by every page.

pub mod auth_provider;
pub mod nav_bar;
pub mod protected_route;
