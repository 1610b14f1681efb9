//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! A page is plain data built by the router once guard and resolver have
//! succeeded. Pages that submit forms expose `submit`-style actions which
//! call a service and then navigate.

pub mod dashboard;
pub mod driver_detail;
pub mod landing;
pub mod log_in;
pub mod rider_request;
pub mod sign_up;
pub mod trip_detail;


use serde::Serialize;

use crate::app::App;
use crate::error::ActionError;
use crate::net::types::Trip;
use crate::routing::resolvers::Resolved;
use crate::routing::routes::PageKind;
use crate::state::session::SessionStore;

use dashboard::{DriverDashboard, RiderDashboard};
use landing::Landing;
use trip_detail::TripDetail;

/// The active page and the data it was constructed with.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Landing(Landing),
    SignUp,
    LogIn,
    RiderDashboard(RiderDashboard),
    RiderRequest,
    RiderDetail(TripDetail),
    DriverDashboard(DriverDashboard),
    DriverDetail(TripDetail),
}

impl Page {
    /// Build the page for `kind`. Returns `None` when the resolved data does
    /// not fit the page, which means the route table is misconfigured.
    #[must_use]
    pub fn build(kind: PageKind, resolved: Option<Resolved>, session: &SessionStore) -> Option<Self> {
        let page = match (kind, resolved) {
            (PageKind::Landing, None) => Self::Landing(Landing { user: session.user() }),
            (PageKind::SignUp, None) => Self::SignUp,
            (PageKind::LogIn, None) => Self::LogIn,
            (PageKind::RiderRequest, None) => Self::RiderRequest,
            (PageKind::RiderDashboard, Some(Resolved::Trips(trips))) => Self::RiderDashboard(RiderDashboard { trips }),
            (PageKind::DriverDashboard, Some(Resolved::Trips(trips))) => {
                Self::DriverDashboard(DriverDashboard { trips })
            }
            (PageKind::RiderDetail, Some(Resolved::Trip(trip))) => Self::RiderDetail(TripDetail { trip }),
            (PageKind::DriverDetail, Some(Resolved::Trip(trip))) => Self::DriverDetail(TripDetail { trip }),
            _ => return None,
        };
        Some(page)
    }

    #[must_use]
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Landing(_) => PageKind::Landing,
            Self::SignUp => PageKind::SignUp,
            Self::LogIn => PageKind::LogIn,
            Self::RiderDashboard(_) => PageKind::RiderDashboard,
            Self::RiderRequest => PageKind::RiderRequest,
            Self::RiderDetail(_) => PageKind::RiderDetail,
            Self::DriverDashboard(_) => PageKind::DriverDashboard,
            Self::DriverDetail(_) => PageKind::DriverDetail,
        }
    }
}

/// Navigate after a trip change the server has already stored. A failed
/// navigation keeps the trip in [`ActionError::TripSaved`].
pub(crate) async fn navigate_after_save(app: &mut App, trip: Trip, path: &str) -> Result<Trip, ActionError> {
    match app.navigate(path).await {
        Ok(_) => Ok(trip),
        Err(source) => {
            tracing::warn!(trip_id = %trip.id, %path, error = %source, "trip saved but navigation failed");
            Err(ActionError::TripSaved { trip: Box::new(trip), source })
        }
    }
}
