use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;

use super::*;
use crate::net::api::TRIPS_ENDPOINT;
use crate::net::types::TripStatus;
use crate::test_support::{MockTransport, rider, session_for, trip, trip_json};

fn snapshot(path: &str, pattern: &'static str, params: &[(&str, &str)]) -> RouteSnapshot {
    RouteSnapshot {
        path: path.to_owned(),
        pattern,
        params: params.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect::<HashMap<_, _>>(),
    }
}

fn trip_service(transport: &Arc<MockTransport>) -> TripService {
    TripService::new(transport.clone(), session_for(rider()))
}

#[tokio::test]
async fn detail_resolver_returns_fetched_trip_unchanged() {
    for id in ["42", "1", "a5c1e2f0-0000-4000-8000-000000000001"] {
        let expected = trip(id, TripStatus::InProgress);
        let path = format!("/api/trips/{id}/");
        let transport = Arc::new(MockTransport::new().respond(Method::GET, &path, 200, trip_json(&expected)));
        let service = trip_service(&transport);
        let direct = service.get_trip(id).await.unwrap();

        let resolver = TripDetailResolver::new(service);
        let resolved = resolver
            .resolve(&snapshot(&format!("/rider/{id}"), "/rider/:id", &[("id", id)]))
            .await
            .unwrap();

        assert_eq!(resolved, Resolved::Trip(direct));
        assert_eq!(resolved, Resolved::Trip(expected));
        assert_eq!(transport.calls(&Method::GET, &path), 2);
    }
}

#[tokio::test]
async fn detail_resolver_fetches_exactly_once_per_resolve() {
    let transport =
        Arc::new(MockTransport::new().respond(Method::GET, "/api/trips/42/", 200, trip_json(&trip("42", TripStatus::Started))));
    let resolver = TripDetailResolver::new(trip_service(&transport));

    resolver.resolve(&snapshot("/rider/42", "/rider/:id", &[("id", "42")])).await.unwrap();
    assert_eq!(transport.requests().len(), 1);

    resolver.resolve(&snapshot("/rider/42", "/rider/:id", &[("id", "42")])).await.unwrap();
    assert_eq!(transport.requests().len(), 2, "no caching across resolves");
}

#[tokio::test]
async fn detail_resolver_without_id_param_fails_before_fetching() {
    let transport = Arc::new(MockTransport::new());
    let resolver = TripDetailResolver::new(trip_service(&transport));

    let err = resolver.resolve(&snapshot("/rider", "/rider", &[])).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingRouteParam("id")));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn detail_resolver_propagates_fetch_failure() {
    let transport = Arc::new(MockTransport::new().network_down(Method::GET, "/api/trips/42/"));
    let resolver = TripDetailResolver::new(trip_service(&transport));

    let err = resolver.resolve(&snapshot("/rider/42", "/rider/:id", &[("id", "42")])).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn list_resolver_returns_all_trips() {
    let trips = vec![trip("1", TripStatus::Requested), trip("2", TripStatus::Completed)];
    let transport =
        Arc::new(MockTransport::new().respond(Method::GET, TRIPS_ENDPOINT, 200, serde_json::to_value(&trips).unwrap()));
    let resolver = TripListResolver::new(trip_service(&transport));

    let resolved = resolver.resolve(&snapshot("/rider", "/rider", &[])).await.unwrap();
    assert_eq!(resolved, Resolved::Trips(trips));
    assert_eq!(transport.calls(&Method::GET, TRIPS_ENDPOINT), 1);
}

#[tokio::test]
async fn list_resolver_propagates_server_error() {
    let transport = Arc::new(MockTransport::new().respond(Method::GET, TRIPS_ENDPOINT, 503, serde_json::Value::Null));
    let resolver = TripListResolver::new(trip_service(&transport));

    let err = resolver.resolve(&snapshot("/driver", "/driver", &[])).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}
