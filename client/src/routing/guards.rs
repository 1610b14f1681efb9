//! Role guards for the rider and driver subtrees.
//!
//! A guard only answers "may this navigation proceed". Choosing where to go
//! instead is the router's job, via [`fallback_path`].

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use crate::net::types::Role;
use crate::state::session::SessionStore;

use super::routes::{LANDING_PATH, LOG_IN_PATH};

pub trait Guard: Send + Sync {
    fn can_activate(&self, session: &SessionStore) -> bool;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Allows only logged-in riders.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsRider;

/// Allows only logged-in drivers.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsDriver;

impl Guard for IsRider {
    fn can_activate(&self, session: &SessionStore) -> bool {
        session.role() == Some(Role::Rider)
    }

    fn name(&self) -> &'static str {
        "IsRider"
    }
}

impl Guard for IsDriver {
    fn can_activate(&self, session: &SessionStore) -> bool {
        session.role() == Some(Role::Driver)
    }

    fn name(&self) -> &'static str {
        "IsDriver"
    }
}

/// Where a denied navigation lands: log-in when anonymous, landing otherwise.
#[must_use]
pub fn fallback_path(session: &SessionStore) -> &'static str {
    if session.is_logged_in() { LANDING_PATH } else { LOG_IN_PATH }
}
