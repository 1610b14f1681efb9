//! Application shell.
//!
//! DESIGN
//! ======
//! `App` is created once at start-up. It owns the router and hands the same
//! `SessionStore` handle to the auth service, the trip service and the guards,
//! so there is no hidden global state.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{ApiError, NavigationError};
use crate::net::api::{HttpTransport, Transport};
use crate::pages::Page;
use crate::routing::router::Router;
use crate::routing::routes::route_table;
use crate::services::auth::AuthService;
use crate::services::trips::TripService;
use crate::state::session::SessionStore;

pub struct App {
    session: SessionStore,
    auth: AuthService,
    trips: TripService,
    router: Router,
}

impl App {
    /// Build the app against the configured HTTP API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        let session = match &config.session_file {
            Some(path) => SessionStore::persistent(path),
            None => SessionStore::new(),
        };
        tracing::debug!(base_url = %transport.base_url(), logged_in = session.is_logged_in(), "app initialized");
        Ok(Self::with_transport(transport, session))
    }

    /// Build the app over any transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        let auth = AuthService::new(transport.clone(), session.clone());
        let trips = TripService::new(transport, session.clone());
        let router = Router::new(route_table(&trips), session.clone());
        Self { session, auth, trips, router }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub fn trips(&self) -> &TripService {
        &self.trips
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// See [`Router::navigate`].
    ///
    /// # Errors
    ///
    /// Propagates the router's navigation error.
    pub async fn navigate(&mut self, url: &str) -> Result<&Page, NavigationError> {
        self.router.navigate(url).await
    }
}
