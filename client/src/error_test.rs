use super::*;

#[test]
fn from_status_splits_client_and_server() {
    assert!(matches!(ApiError::from_status(400, "bad".into()), ApiError::Client { status: 400, .. }));
    assert!(matches!(ApiError::from_status(404, "missing".into()), ApiError::Client { status: 404, .. }));
    assert!(matches!(ApiError::from_status(500, "boom".into()), ApiError::Server { status: 500, .. }));
    assert!(matches!(ApiError::from_status(503, "down".into()), ApiError::Server { status: 503, .. }));
}

#[test]
fn non_success_outside_4xx_5xx_is_treated_as_rejection() {
    assert!(matches!(ApiError::from_status(302, String::new()), ApiError::Client { status: 302, .. }));
}

#[test]
fn status_only_present_for_http_errors() {
    assert_eq!(ApiError::from_status(422, String::new()).status(), Some(422));
    assert_eq!(ApiError::Network("refused".into()).status(), None);
    assert_eq!(ApiError::NotAuthenticated.status(), None);
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(ApiError::Network(String::new()).error_code(), "E_NETWORK");
    assert_eq!(ApiError::from_status(401, String::new()).error_code(), "E_UNAUTHORIZED");
    assert_eq!(ApiError::from_status(403, String::new()).error_code(), "E_UNAUTHORIZED");
    assert_eq!(ApiError::from_status(404, String::new()).error_code(), "E_NOT_FOUND");
    assert_eq!(ApiError::from_status(400, String::new()).error_code(), "E_REJECTED");
    assert_eq!(ApiError::from_status(502, String::new()).error_code(), "E_SERVER");
    assert_eq!(ApiError::MissingRouteParam("id").error_code(), "E_MISSING_ROUTE_PARAM");
    assert_eq!(ApiError::InvalidTripId("1/2".into()).error_code(), "E_INVALID_TRIP_ID");
}

#[test]
fn display_includes_status_and_message() {
    let err = ApiError::from_status(400, "username taken".into());
    assert_eq!(err.to_string(), "request rejected with status 400: username taken");
}

#[test]
fn navigation_error_wraps_api_error() {
    let err: NavigationError = ApiError::Network("reset".into()).into();
    assert_eq!(err.to_string(), "route data failed to resolve: network request failed: reset");
}

#[test]
fn action_error_is_transparent() {
    let err: ActionError = NavigationError::NotFound("/nope".into()).into();
    assert_eq!(err.to_string(), "no route matches `/nope`");
}

#[test]
fn trip_saved_names_trip_and_keeps_it() {
    let err = ActionError::TripSaved {
        trip: Box::new(crate::test_support::trip("5", crate::net::types::TripStatus::Requested)),
        source: NavigationError::NotFound("/rider".into()),
    };
    assert_eq!(err.to_string(), "trip 5 was saved but navigation failed: no route matches `/rider`");
    assert_eq!(err.saved_trip().map(|t| t.id.as_str()), Some("5"));
}
