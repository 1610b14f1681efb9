use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_parses_case_insensitively() {
    assert_eq!("Rider".parse::<Role>(), Ok(Role::Rider));
    assert_eq!(" DRIVER ".parse::<Role>(), Ok(Role::Driver));
    assert!("admin".parse::<Role>().is_err());
}

#[test]
fn role_home_paths() {
    assert_eq!(Role::Rider.home_path(), "/rider");
    assert_eq!(Role::Driver.home_path(), "/driver");
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Driver).unwrap(), serde_json::json!("driver"));
}

// =============================================================
// User
// =============================================================

#[test]
fn user_accepts_numeric_id_and_missing_optionals() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 7,
        "username": "alice",
        "group": "rider"
    }))
    .unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.first_name, "");
    assert_eq!(user.photo, None);
    assert_eq!(user.group, Role::Rider);
}

#[test]
fn user_rejects_unknown_group() {
    let result = serde_json::from_value::<User>(serde_json::json!({
        "id": "u1",
        "username": "alice",
        "group": "admin"
    }));
    assert!(result.is_err());
}

#[test]
fn user_rejects_empty_id() {
    let result = serde_json::from_value::<User>(serde_json::json!({
        "id": "",
        "username": "alice",
        "group": "rider"
    }));
    assert!(result.is_err());
}

#[test]
fn display_name_prefers_full_name() {
    let mut user: User = serde_json::from_value(serde_json::json!({
        "id": "u1",
        "username": "alice",
        "first_name": "Alice",
        "last_name": "Liddell",
        "group": "rider"
    }))
    .unwrap();
    assert_eq!(user.display_name(), "Alice Liddell");
    user.first_name.clear();
    user.last_name = "  ".to_owned();
    assert_eq!(user.display_name(), "alice");
}

// =============================================================
// Photo
// =============================================================

#[test]
fn photo_guesses_content_type() {
    assert_eq!(Photo::new("me.PNG", vec![]).content_type, "image/png");
    assert_eq!(Photo::new("me.jpeg", vec![]).content_type, "image/jpeg");
    assert_eq!(Photo::new("me", vec![]).content_type, "application/octet-stream");
}

// =============================================================
// Trip
// =============================================================

#[test]
fn trip_status_uses_screaming_snake_case() {
    let status: TripStatus = serde_json::from_value(serde_json::json!("IN_PROGRESS")).unwrap();
    assert_eq!(status, TripStatus::InProgress);
    assert_eq!(serde_json::to_value(TripStatus::Requested).unwrap(), serde_json::json!("REQUESTED"));
}

#[test]
fn trip_status_predicates() {
    assert!(TripStatus::Completed.is_completed());
    assert!(!TripStatus::Requested.is_underway());
    assert!(TripStatus::Started.is_underway());
    assert!(TripStatus::InProgress.is_underway());
}

#[test]
fn trip_decodes_nested_users() {
    let trip: Trip = serde_json::from_value(serde_json::json!({
        "id": "42",
        "created": "2026-01-01T00:00:00Z",
        "pick_up_address": "123 Main St",
        "drop_off_address": "456 Elm St",
        "status": "STARTED",
        "rider": { "id": 1, "username": "alice", "group": "rider" },
        "driver": { "id": 2, "username": "bob", "group": "driver" }
    }))
    .unwrap();
    assert_eq!(trip.id, "42");
    assert_eq!(trip.updated, None);
    assert_eq!(trip.rider.map(|u| u.username), Some("alice".to_owned()));
    assert_eq!(trip.driver.map(|u| u.group), Some(Role::Driver));
}

#[test]
fn trip_update_skips_unset_fields() {
    let update = TripUpdate { status: Some(TripStatus::Completed), driver: None };
    assert_eq!(serde_json::to_value(update).unwrap(), serde_json::json!({ "status": "COMPLETED" }));
}

#[test]
fn log_in_response_decodes() {
    let response: LogInResponse = serde_json::from_value(serde_json::json!({
        "user": { "id": "u1", "username": "alice", "group": "rider" },
        "token": "abc123"
    }))
    .unwrap();
    assert_eq!(response.token, "abc123");
    assert_eq!(response.user.username, "alice");
}
