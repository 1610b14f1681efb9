//! Wire DTOs for the ride-sharing REST API.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON payloads so serde round-trips stay
//! lossless. Identifiers arrive as either numbers or strings depending on the
//! backend, so they are normalized to `String` on the way in.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// Account group; decides which dashboard subtree a user may enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Rider,
    Driver,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rider => "rider",
            Self::Driver => "driver",
        }
    }

    /// Dashboard path for this role.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Rider => "/rider",
            Self::Driver => "/driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rider" => Ok(Self::Rider),
            "driver" => Ok(Self::Driver),
            other => Err(format!("unknown group '{other}' (expected 'rider' or 'driver')")),
        }
    }
}

/// A user account as returned by sign-up and log-in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub group: Role,
    /// Profile photo URL, if one was uploaded.
    #[serde(default)]
    pub photo: Option<String>,
}

impl User {
    /// "First Last", falling back to the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() { self.username.clone() } else { full.to_owned() }
    }
}

/// Body of `POST /api/log_in/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogInCredentials {
    pub username: String,
    pub password: String,
}

/// Response of `POST /api/log_in/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LogInResponse {
    pub user: User,
    pub token: String,
}

/// Image uploaded with the sign-up form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    /// Build a photo part, guessing the content type from the file extension.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_owned();
        Self { file_name, content_type, bytes }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Fields of `POST /api/sign_up/`, sent as multipart form data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password1: String,
    pub password2: String,
    pub group: Role,
    pub photo: Option<Photo>,
}

// =============================================================================
// TRIPS
// =============================================================================

/// Trip lifecycle. Riders create `Requested`; drivers move it forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Requested,
    Started,
    InProgress,
    Completed,
}

impl TripStatus {
    #[must_use]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    /// Accepted by a driver but not finished.
    #[must_use]
    pub fn is_underway(self) -> bool {
        matches!(self, Self::Started | Self::InProgress)
    }
}

/// A trip as returned by `/api/trips/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
    /// ISO 8601 timestamp of the last status change.
    #[serde(default)]
    pub updated: Option<String>,
    pub pick_up_address: String,
    pub drop_off_address: String,
    pub status: TripStatus,
    #[serde(default)]
    pub rider: Option<User>,
    #[serde(default)]
    pub driver: Option<User>,
}

/// Body of `POST /api/trips/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTrip {
    pub pick_up_address: String,
    pub drop_off_address: String,
    pub status: TripStatus,
    /// Rider user id.
    pub rider: String,
}

/// Partial body of `PATCH /api/trips/:id/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TripUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TripStatus>,
    /// Driver user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected non-empty string or integer id")),
    }
}
