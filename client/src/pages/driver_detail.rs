//! Driver trip actions.
//!
//! Each action updates the trip and then re-enters `/driver/:id` so the page
//! is rebuilt from a fresh fetch rather than from the update response. A
//! failed re-fetch does not hide the update: the stored trip comes back in
//! [`ActionError::TripSaved`].

use crate::app::App;
use crate::error::ActionError;
use crate::net::types::Trip;
use crate::routing::routes::driver_trip_path;

use super::navigate_after_save;

/// Accept a requested trip as the logged-in driver.
///
/// # Errors
///
/// Returns the update error without navigating, or [`ActionError::TripSaved`].
pub async fn accept(app: &mut App, trip_id: &str) -> Result<Trip, ActionError> {
    let trip = app.trips().accept_trip(trip_id).await?;
    navigate_after_save(app, trip, &driver_trip_path(trip_id)).await
}

/// Mark the trip as picked up.
///
/// # Errors
///
/// Returns the update error without navigating, or [`ActionError::TripSaved`].
pub async fn start(app: &mut App, trip_id: &str) -> Result<Trip, ActionError> {
    let trip = app.trips().start_trip(trip_id).await?;
    navigate_after_save(app, trip, &driver_trip_path(trip_id)).await
}

/// Mark the trip as dropped off.
///
/// # Errors
///
/// Returns the update error without navigating, or [`ActionError::TripSaved`].
pub async fn complete(app: &mut App, trip_id: &str) -> Result<Trip, ActionError> {
    let trip = app.trips().complete_trip(trip_id).await?;
    navigate_after_save(app, trip, &driver_trip_path(trip_id)).await
}
