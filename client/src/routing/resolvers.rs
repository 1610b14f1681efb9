//! Pre-navigation data fetches.
//!
//! A resolver runs after the guard and before the page is built. The router
//! awaits it; an error aborts the navigation. Results pass through untouched.

#[cfg(test)]
#[path = "resolvers_test.rs"]
mod resolvers_test;

use crate::error::ApiError;
use crate::net::types::Trip;
use crate::services::trips::TripService;

use super::routes::RouteSnapshot;

/// Data handed to a page at construction time.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Trips(Vec<Trip>),
    Trip(Trip),
}

#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// # Errors
    ///
    /// Returns whatever the underlying fetch returned; no local recovery.
    async fn resolve(&self, snapshot: &RouteSnapshot) -> Result<Resolved, ApiError>;
}

/// Fetches every trip visible to the current user.
pub struct TripListResolver {
    trips: TripService,
}

impl TripListResolver {
    #[must_use]
    pub fn new(trips: TripService) -> Self {
        Self { trips }
    }
}

#[async_trait::async_trait]
impl Resolver for TripListResolver {
    async fn resolve(&self, _snapshot: &RouteSnapshot) -> Result<Resolved, ApiError> {
        self.trips.get_trips().await.map(Resolved::Trips)
    }
}

/// Fetches the trip named by the route's `:id` parameter.
pub struct TripDetailResolver {
    trips: TripService,
}

impl TripDetailResolver {
    #[must_use]
    pub fn new(trips: TripService) -> Self {
        Self { trips }
    }
}

#[async_trait::async_trait]
impl Resolver for TripDetailResolver {
    async fn resolve(&self, snapshot: &RouteSnapshot) -> Result<Resolved, ApiError> {
        let trip_id = snapshot.param("id").ok_or(ApiError::MissingRouteParam("id"))?;
        self.trips.get_trip(trip_id).await.map(Resolved::Trip)
    }
}
