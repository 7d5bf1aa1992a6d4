//! # profile-portal
//!
//! Leptos + WASM frontend for signing in, editing a personal profile, and
//! reaching an admin view. Authentication and row storage live in a managed
//! backend reached over REST (`net::supabase`).
//!
//! Browser-only code is gated behind the `csr` feature; state, routing
//! decisions, and wire types are plain Rust tested natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;
