//! Domain entities exchanged with the backend
//!
//! Every entity carries a stable numeric `id`. Each entity has a draft
//! counterpart holding only the user-editable fields; drafts are the input of
//! create and update operations.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier given to a provisionally created entity until the server
/// assigns one
pub const PLACEHOLDER_ID: i64 = 0;

/// An entity stored by the backend under a numeric identifier
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> i64;
}

/// Aircraft performance profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub id: i64,
    pub model: String,
    pub registration: String,
    #[serde(default)]
    pub is_preferred: bool,
    pub fuel_capacity_gal: f64,
    pub max_takeoff_weight_lb: f64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfileDraft {
    pub model: String,
    pub registration: String,
    #[serde(default)]
    pub is_preferred: bool,
    pub fuel_capacity_gal: f64,
    pub max_takeoff_weight_lb: f64,
}

/// Aerodrome, either from the official registry or added by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aerodrome {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub lat_degrees: f64,
    pub lon_degrees: f64,
    pub elevation_ft: i32,
    #[serde(default)]
    pub is_registered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerodromeDraft {
    pub code: String,
    pub name: String,
    pub lat_degrees: f64,
    pub lon_degrees: f64,
    pub elevation_ft: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub lat_degrees: f64,
    pub lon_degrees: f64,
    #[serde(default)]
    pub magnetic_variation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointDraft {
    pub code: String,
    pub name: String,
    pub lat_degrees: f64,
    pub lon_degrees: f64,
    #[serde(default)]
    pub magnetic_variation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: i64,
    pub name: String,
    pub weight_lb: f64,
    #[serde(default)]
    pub is_me: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerDraft {
    pub name: String,
    pub weight_lb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    #[default]
    Draft,
    Planned,
    Completed,
}

impl FlightStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Planned => "Planned",
            Self::Completed => "Completed",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Draft, Self::Planned, Self::Completed]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: i64,
    pub departure_aerodrome_id: i64,
    pub arrival_aerodrome_id: i64,
    pub aircraft_id: i64,
    pub departure_time: DateTime<Utc>,
    #[serde(default)]
    pub status: FlightStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightDraft {
    pub departure_aerodrome_id: i64,
    pub arrival_aerodrome_id: i64,
    pub aircraft_id: i64,
    pub departure_time: DateTime<Utc>,
    #[serde(default)]
    pub status: FlightStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub weight_lb: f64,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub weight_lb: f64,
    #[serde(default)]
    pub is_admin: bool,
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_entity!(AircraftProfile, Aerodrome, Waypoint, Passenger, Flight, User);
