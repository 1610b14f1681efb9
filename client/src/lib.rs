//! Ride-sharing client core.
//!
//! ARCHITECTURE
//! ============
//! `state::session` holds the authenticated user, `services` wrap the REST
//! endpoints, and `routing` evaluates a static route table: guard first, then
//! resolver, then page construction. `app::App` wires them together at start-up.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod routing;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::App;
pub use config::ClientConfig;
pub use error::{ActionError, ApiError, NavigationError};
