//! Static route table and path matching.
//!
//! DESIGN
//! ======
//! Routes are tried in table order, so literal segments must precede
//! parameter segments that would also match (`/rider/request` before
//! `/rider/:id`). URLs are hash-based; `#/rider/42`, `/rider/42/` and
//! `rider/42?x=1` all normalize to `/rider/42`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::services::trips::TripService;

use super::guards::{Guard, IsDriver, IsRider};
use super::resolvers::{Resolver, TripDetailResolver, TripListResolver};

pub const LANDING_PATH: &str = "/";
pub const SIGN_UP_PATH: &str = "/sign-up";
pub const LOG_IN_PATH: &str = "/log-in";
pub const RIDER_PATH: &str = "/rider";
pub const RIDER_REQUEST_PATH: &str = "/rider/request";
pub const DRIVER_PATH: &str = "/driver";

#[must_use]
pub fn rider_trip_path(trip_id: &str) -> String {
    format!("{RIDER_PATH}/{trip_id}")
}

#[must_use]
pub fn driver_trip_path(trip_id: &str) -> String {
    format!("{DRIVER_PATH}/{trip_id}")
}

/// Which page a route builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Landing,
    SignUp,
    LogIn,
    RiderDashboard,
    RiderRequest,
    RiderDetail,
    DriverDashboard,
    DriverDetail,
}

/// One table entry: `{pattern, guard, resolver, page}`.
#[derive(Clone)]
pub struct Route {
    pub pattern: &'static str,
    pub guard: Option<Arc<dyn Guard>>,
    pub resolver: Option<Arc<dyn Resolver>>,
    pub page: PageKind,
}

impl Route {
    #[must_use]
    pub fn new(pattern: &'static str, page: PageKind) -> Self {
        Self { pattern, guard: None, resolver: None, page }
    }

    #[must_use]
    pub fn guarded_by(mut self, guard: Arc<dyn Guard>) -> Self {
        self.guard = Some(guard);
        self
    }

    #[must_use]
    pub fn resolved_by(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("guard", &self.guard.as_ref().map(|g| g.name()))
            .field("resolver", &self.resolver.is_some())
            .field("page", &self.page)
            .finish()
    }
}

/// The matched route as seen by a resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSnapshot {
    pub path: String,
    pub pattern: &'static str,
    pub params: HashMap<String, String>,
}

impl RouteSnapshot {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// The application's route table.
#[must_use]
pub fn route_table(trips: &TripService) -> Vec<Route> {
    let is_rider: Arc<dyn Guard> = Arc::new(IsRider);
    let is_driver: Arc<dyn Guard> = Arc::new(IsDriver);
    let trip_list: Arc<dyn Resolver> = Arc::new(TripListResolver::new(trips.clone()));
    let trip_detail: Arc<dyn Resolver> = Arc::new(TripDetailResolver::new(trips.clone()));

    vec![
        Route::new(LANDING_PATH, PageKind::Landing),
        Route::new(SIGN_UP_PATH, PageKind::SignUp),
        Route::new(LOG_IN_PATH, PageKind::LogIn),
        Route::new(RIDER_PATH, PageKind::RiderDashboard)
            .guarded_by(is_rider.clone())
            .resolved_by(trip_list.clone()),
        Route::new(RIDER_REQUEST_PATH, PageKind::RiderRequest).guarded_by(is_rider.clone()),
        Route::new("/rider/:id", PageKind::RiderDetail)
            .guarded_by(is_rider)
            .resolved_by(trip_detail.clone()),
        Route::new(DRIVER_PATH, PageKind::DriverDashboard)
            .guarded_by(is_driver.clone())
            .resolved_by(trip_list),
        Route::new("/driver/:id", PageKind::DriverDetail)
            .guarded_by(is_driver)
            .resolved_by(trip_detail),
    ]
}

/// Strip the hash prefix, query string and trailing slash.
#[must_use]
pub fn normalize_path(url: &str) -> String {
    let path = url.trim();
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Render a path as a hash-router href.
#[must_use]
pub fn href(path: &str) -> String {
    format!("#{}", normalize_path(path))
}

/// Match a normalized path against a `/literal/:param` pattern.
#[must_use]
pub fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = expected.strip_prefix(':') {
            params.insert(name.to_owned(), (*actual).to_owned());
        } else if expected != actual {
            return None;
        }
    }
    Some(params)
}
