//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `profile`) so pages and components can
//! depend on small focused models that test without a browser.

pub mod auth;
pub mod profile;
