//! Networking: REST transport and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the `Transport` seam and the `reqwest` implementation; `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
