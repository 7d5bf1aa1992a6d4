//! Networking modules for the managed backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` defines the seam the UI depends on, `supabase` implements it over
//! REST, `types` defines the wire schema, and `error` the failure taxonomy.

pub mod backend;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod supabase;
pub mod types;
