//! Rider and driver dashboards.
//!
//! Both receive the full trip list from `TripListResolver` and only split it
//! into the sections each role cares about.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::Serialize;

use crate::net::types::{Trip, TripStatus};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiderDashboard {
    pub trips: Vec<Trip>,
}

impl RiderDashboard {
    /// Trips that have not finished yet, including unaccepted requests.
    #[must_use]
    pub fn current_trips(&self) -> Vec<&Trip> {
        self.trips.iter().filter(|t| !t.status.is_completed()).collect()
    }

    #[must_use]
    pub fn completed_trips(&self) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.status.is_completed()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriverDashboard {
    pub trips: Vec<Trip>,
}

impl DriverDashboard {
    /// Open requests waiting for a driver.
    #[must_use]
    pub fn requested_trips(&self) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.status == TripStatus::Requested).collect()
    }

    #[must_use]
    pub fn current_trips(&self) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.status.is_underway()).collect()
    }

    #[must_use]
    pub fn completed_trips(&self) -> Vec<&Trip> {
        self.trips.iter().filter(|t| t.status.is_completed()).collect()
    }
}
