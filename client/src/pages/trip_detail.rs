//! Trip detail page shared by the rider and driver subtrees.

use serde::Serialize;

use crate::net::types::Trip;

/// Holds the trip exactly as `TripDetailResolver` returned it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripDetail {
    pub trip: Trip,
}
