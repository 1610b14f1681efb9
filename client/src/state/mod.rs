//! Client-side state shared across services, guards and pages.

pub mod session;
