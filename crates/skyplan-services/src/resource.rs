//! Resource descriptors
//!
//! A [`Resource`] names an entity collection of the backend: where it lives in
//! the API, where it lives in the query store, how a provisional entity is
//! synthesized from a draft, and which derived keys go stale when one of its
//! entities changes. The generic entity operations are written once against
//! this trait.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use skyplan_core::{
    Aerodrome, AerodromeDraft, AircraftProfile, AircraftProfileDraft, ApiError, ApiResult, Entity,
    Flight, FlightDraft, Passenger, PassengerDraft, QueryKey, User, UserDraft, Waypoint,
    WaypointDraft,
};

pub trait Resource: Send + Sync + 'static {
    type Entity: Entity;
    type Draft: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Collection path in the API and root segment of its query keys
    const PATH: &'static str;

    /// Singular name used in notifications, e.g. "Flight"
    const LABEL: &'static str;

    fn list_key() -> QueryKey {
        QueryKey::new(Self::PATH)
    }

    fn entity_key(id: i64) -> QueryKey {
        Self::list_key().with(id)
    }

    fn entity_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }

    /// Server-derived fields a provisional entity needs to deserialize
    fn server_defaults(_now: DateTime<Utc>) -> Map<String, Value> {
        Map::new()
    }

    /// Keys derived from entity `id`, stale once it changes
    fn dependents(_id: i64) -> Vec<QueryKey> {
        Vec::new()
    }

    /// Build a provisional entity from `draft` under `id`
    fn provisional(draft: &Self::Draft, id: i64) -> ApiResult<Value> {
        let mut value = serde_json::to_value(draft)?;
        let Value::Object(fields) = &mut value else {
            return Err(ApiError::Serialization(format!(
                "{} draft is not a JSON object",
                Self::LABEL
            )));
        };
        for (key, default) in Self::server_defaults(Utc::now()) {
            fields.entry(key).or_insert(default);
        }
        fields.insert("id".to_string(), json!(id));
        Ok(value)
    }
}

fn timestamps(now: DateTime<Utc>) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("created_at".into(), json!(now));
    fields.insert("last_updated".into(), json!(now));
    fields
}

pub struct Aircraft;

impl Resource for Aircraft {
    type Entity = AircraftProfile;
    type Draft = AircraftProfileDraft;
    const PATH: &'static str = "aircraft";
    const LABEL: &'static str = "Aircraft profile";

    fn server_defaults(now: DateTime<Utc>) -> Map<String, Value> {
        timestamps(now)
    }

    fn dependents(id: i64) -> Vec<QueryKey> {
        vec![Self::entity_key(id).with("performance")]
    }
}

pub struct Aerodromes;

impl Resource for Aerodromes {
    type Entity = Aerodrome;
    type Draft = AerodromeDraft;
    const PATH: &'static str = "aerodromes";
    const LABEL: &'static str = "Aerodrome";

    fn server_defaults(_now: DateTime<Utc>) -> Map<String, Value> {
        // Aerodromes created by users are never official registrations
        let mut fields = Map::new();
        fields.insert("is_registered".into(), json!(false));
        fields
    }
}

pub struct Waypoints;

impl Resource for Waypoints {
    type Entity = Waypoint;
    type Draft = WaypointDraft;
    const PATH: &'static str = "waypoints";
    const LABEL: &'static str = "Waypoint";
}

pub struct Passengers;

impl Resource for Passengers {
    type Entity = Passenger;
    type Draft = PassengerDraft;
    const PATH: &'static str = "passengers";
    const LABEL: &'static str = "Passenger";

    fn server_defaults(_now: DateTime<Utc>) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("is_me".into(), json!(false));
        fields
    }
}

pub struct Flights;

impl Resource for Flights {
    type Entity = Flight;
    type Draft = FlightDraft;
    const PATH: &'static str = "flights";
    const LABEL: &'static str = "Flight";

    fn server_defaults(now: DateTime<Utc>) -> Map<String, Value> {
        timestamps(now)
    }

    fn dependents(id: i64) -> Vec<QueryKey> {
        vec![Self::entity_key(id).with("weight-balance")]
    }
}

pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Draft = UserDraft;
    const PATH: &'static str = "users";
    const LABEL: &'static str = "User";
}
