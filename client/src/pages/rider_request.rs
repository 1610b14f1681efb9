//! Rider "request a ride" page action.

use crate::app::App;
use crate::error::ActionError;
use crate::net::types::Trip;
use crate::routing::routes::RIDER_PATH;

use super::navigate_after_save;

/// Request a trip, then go back to the rider dashboard.
///
/// # Errors
///
/// Returns the trip creation error without navigating. If the trip was
/// created but the dashboard fails to load, returns
/// [`ActionError::TripSaved`] carrying the new trip.
pub async fn submit(app: &mut App, pick_up_address: &str, drop_off_address: &str) -> Result<Trip, ActionError> {
    let trip = app.trips().create_trip(pick_up_address, drop_off_address).await?;
    navigate_after_save(app, trip, RIDER_PATH).await
}
