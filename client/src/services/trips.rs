//! Trip endpoints: list, fetch, request and status updates.
//!
//! One HTTP call per method. No caching and no pagination; every resolver run
//! goes back to the server.

#[cfg(test)]
#[path = "trips_test.rs"]
mod trips_test;

use std::sync::Arc;

use crate::error::ApiError;
use crate::net::api::{ApiRequest, TRIPS_ENDPOINT, Transport, trip_endpoint};
use crate::net::types::{NewTrip, Trip, TripStatus, TripUpdate};
use crate::state::session::SessionStore;

#[derive(Clone)]
pub struct TripService {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl TripService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self { transport, session }
    }

    /// `GET /api/trips/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn get_trips(&self) -> Result<Vec<Trip>, ApiError> {
        let trips: Vec<Trip> = self.send(ApiRequest::get(TRIPS_ENDPOINT)).await?;
        tracing::debug!(count = trips.len(), "fetched trips");
        Ok(trips)
    }

    /// `GET /api/trips/:id/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn get_trip(&self, trip_id: &str) -> Result<Trip, ApiError> {
        self.send(ApiRequest::get(trip_endpoint(trip_id)?)).await
    }

    /// Request a ride for the logged-in rider via `POST /api/trips/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise the
    /// transport, status or decode error.
    pub async fn create_trip(&self, pick_up_address: &str, drop_off_address: &str) -> Result<Trip, ApiError> {
        let rider = self.session.user().ok_or(ApiError::NotAuthenticated)?;
        let body = NewTrip {
            pick_up_address: pick_up_address.trim().to_owned(),
            drop_off_address: drop_off_address.trim().to_owned(),
            status: TripStatus::Requested,
            rider: rider.id,
        };
        let trip: Trip = self.send(ApiRequest::post_json(TRIPS_ENDPOINT, to_json(&body)?)).await?;
        tracing::info!(trip_id = %trip.id, "trip requested");
        Ok(trip)
    }

    /// `PATCH /api/trips/:id/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode error.
    pub async fn update_trip(&self, trip_id: &str, update: &TripUpdate) -> Result<Trip, ApiError> {
        let trip: Trip = self
            .send(ApiRequest::patch_json(trip_endpoint(trip_id)?, to_json(update)?))
            .await?;
        tracing::info!(trip_id = %trip.id, status = ?trip.status, "trip updated");
        Ok(trip)
    }

    /// Assign the logged-in driver and mark the trip `STARTED`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise the
    /// error from [`TripService::update_trip`].
    pub async fn accept_trip(&self, trip_id: &str) -> Result<Trip, ApiError> {
        let driver = self.session.user().ok_or(ApiError::NotAuthenticated)?;
        let update = TripUpdate { status: Some(TripStatus::Started), driver: Some(driver.id) };
        self.update_trip(trip_id, &update).await
    }

    /// Mark the trip `IN_PROGRESS`.
    ///
    /// # Errors
    ///
    /// See [`TripService::update_trip`].
    pub async fn start_trip(&self, trip_id: &str) -> Result<Trip, ApiError> {
        self.set_status(trip_id, TripStatus::InProgress).await
    }

    /// Mark the trip `COMPLETED`.
    ///
    /// # Errors
    ///
    /// See [`TripService::update_trip`].
    pub async fn complete_trip(&self, trip_id: &str) -> Result<Trip, ApiError> {
        self.set_status(trip_id, TripStatus::Completed).await
    }

    async fn set_status(&self, trip_id: &str, status: TripStatus) -> Result<Trip, ApiError> {
        if !self.session.is_logged_in() {
            return Err(ApiError::NotAuthenticated);
        }
        let update = TripUpdate { status: Some(status), driver: None };
        self.update_trip(trip_id, &update).await
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let request = request.with_token(self.session.token());
        let path = request.path.clone();
        self.transport
            .send(request)
            .await
            .and_then(|response| response.decode())
            .inspect_err(|e| tracing::warn!(%path, error = %e, code = e.error_code(), "trip request failed"))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
