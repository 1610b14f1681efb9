//! REST-backed services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns account and session lifecycle; `trips` wraps the trip
//! endpoints used by resolvers and page actions. Both talk to the server
//! through `net::api::Transport`.

pub mod auth;
pub mod trips;
