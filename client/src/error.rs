//! Error types shared by services, routing and pages.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries. Failures surface to the caller untouched so the
//! router can abort a navigation and pages can show the message inline.

use crate::net::types::Trip;
use crate::routing::routes::PageKind;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors produced by REST calls and the services built on them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server rejected the request (4xx and other non-success statuses).
    #[error("request rejected with status {status}: {message}")]
    Client { status: u16, message: String },

    /// The server failed while handling the request (5xx).
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// A success response did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The operation needs a logged-in user and the session is empty.
    #[error("not logged in")]
    NotAuthenticated,

    /// A resolver was attached to a route without the parameter it reads.
    #[error("missing route parameter `{0}`")]
    MissingRouteParam(&'static str),

    /// A trip id that cannot be used as a single path segment.
    #[error("invalid trip id `{0}`")]
    InvalidTripId(String),
}

impl ApiError {
    /// Classify a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        if (500..=599).contains(&status) {
            Self::Server { status, message }
        } else {
            Self::Client { status, message }
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "E_NETWORK",
            Self::Client { status: 401 | 403, .. } => "E_UNAUTHORIZED",
            Self::Client { status: 404, .. } => "E_NOT_FOUND",
            Self::Client { .. } => "E_REJECTED",
            Self::Server { .. } => "E_SERVER",
            Self::Decode(_) => "E_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::NotAuthenticated => "E_NOT_AUTHENTICATED",
            Self::MissingRouteParam(_) => "E_MISSING_ROUTE_PARAM",
            Self::InvalidTripId(_) => "E_INVALID_TRIP_ID",
        }
    }
}

/// Reasons a navigation is aborted. The router stays on its prior route.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no route matches `{0}`")]
    NotFound(String),

    #[error("too many guard redirects while navigating to `{0}`")]
    RedirectLoop(String),

    #[error("route data failed to resolve: {0}")]
    Resolve(#[from] ApiError),

    #[error("resolved data does not fit page {0:?}")]
    MissingData(PageKind),
}

/// Errors from page actions that call a service and then navigate.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The server stored the trip change; only the follow-up navigation failed.
    #[error("trip {} was saved but navigation failed: {source}", .trip.id)]
    TripSaved { trip: Box<Trip>, source: NavigationError },
}

impl ActionError {
    /// The trip the server already stored, if the action got that far.
    #[must_use]
    pub fn saved_trip(&self) -> Option<&Trip> {
        match self {
            Self::TripSaved { trip, .. } => Some(trip.as_ref()),
            _ => None,
        }
    }
}
