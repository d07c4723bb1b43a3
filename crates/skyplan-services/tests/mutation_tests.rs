//! Integration tests for the generic entity mutations

mod common;

use chrono::{TimeZone, Utc};
use common::{flight, harness, passenger, MockTransport};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use skyplan_cache::{collection, QueryStore};
use skyplan_core::{
    AircraftProfileDraft, ApiError, FlightDraft, FlightStatus, NotificationLevel, PassengerDraft,
};
use skyplan_services::resource::{Aircraft, Flights, Passengers};
use skyplan_services::{Method, Resource};

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .filter_map(collection::id_of)
        .collect()
}

fn flight_draft() -> FlightDraft {
    FlightDraft {
        departure_aerodrome_id: 1,
        arrival_aerodrome_id: 2,
        aircraft_id: 3,
        departure_time: Utc.with_ymd_and_hms(2026, 5, 1, 14, 30, 0).unwrap(),
        status: FlightStatus::Planned,
    }
}

fn rename(name: &str) -> PassengerDraft {
    PassengerDraft {
        name: name.into(),
        weight_lb: 180.0,
    }
}

fn seed_passengers(store: &dyn QueryStore) {
    store.set(
        &Passengers::list_key(),
        json!([passenger(4, "Ann"), passenger(5, "Foo")]),
    );
    store.set(&Passengers::entity_key(5), passenger(5, "Foo"));
}

// ============ Create ============

#[tokio::test]
async fn test_create_replaces_placeholder_with_server_entity() {
    let h = harness::<Flights>(
        MockTransport::new().with_response(Method::Post, "flights", 201, flight(7)),
    );
    h.store.set(&Flights::list_key(), json!([flight(1)]));
    let weight_balance = Flights::entity_key(7).with("weight-balance");
    h.store.set(&weight_balance, json!({"total_lb": 2100.0}));

    let created = h.service.create(flight_draft()).await.unwrap();

    assert_eq!(created.id, 7);
    let list = h.store.get(&Flights::list_key()).unwrap();
    assert_eq!(ids(&list), vec![1, 7]);
    assert!(h.store.entry(&weight_balance).unwrap().stale);

    let received = h.notifier.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].level, NotificationLevel::Success);
    assert_eq!(received[0].message, "Flight created");
}

#[tokio::test]
async fn test_concurrent_creates_keep_both_entities() {
    let h = harness::<Passengers>(MockTransport::new().with_echo(Method::Post, "passengers", 10));
    h.store.set(&Passengers::list_key(), json!([]));

    let (a, b) = tokio::join!(
        h.service.create(rename("Alice")),
        h.service.create(rename("Bob"))
    );

    assert_eq!(a.unwrap().id, 10);
    assert_eq!(b.unwrap().id, 11);
    let list = h.store.get(&Passengers::list_key()).unwrap();
    assert_eq!(ids(&list), vec![10, 11]);
    assert_eq!(list[0]["name"], json!("Alice"));
    assert_eq!(list[1]["name"], json!("Bob"));
    assert!(list[0].get(collection::PROVISIONAL_FIELD).is_none());
}

#[tokio::test]
async fn test_failed_create_removes_provisional_entry() {
    let h = harness::<Flights>(MockTransport::new().with_response(
        Method::Post,
        "flights",
        422,
        json!({"detail": [{"loc": ["body", "departure_time"], "msg": "must be in the future"}]}),
    ));
    h.store.set(&Flights::list_key(), json!([flight(1)]));

    let err = h.service.create(flight_draft()).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation { status: 422, .. }));
    assert_eq!(h.store.get(&Flights::list_key()), Some(json!([flight(1)])));
    assert_eq!(
        h.notifier.received()[0].message,
        "departure_time: must be in the future"
    );
}

#[tokio::test]
async fn test_create_without_cached_list_leaves_it_uncached() {
    let h = harness::<Flights>(
        MockTransport::new().with_response(Method::Post, "flights", 201, flight(7)),
    );

    h.service.create(flight_draft()).await.unwrap();

    assert_eq!(h.store.get(&Flights::list_key()), None);
}

// ============ Update ============

#[tokio::test]
async fn test_failed_edit_keeps_cached_name() {
    let h = harness::<Passengers>(MockTransport::new().with_raw_response(
        Method::Put,
        "passengers/5",
        500,
        "Internal Server Error",
    ));
    seed_passengers(h.store.as_ref());

    let err = h.service.update(5, rename("Bar")).await.unwrap_err();

    assert_eq!(err, ApiError::Unexpected { status: Some(500) });
    assert_eq!(
        h.store.get(&Passengers::list_key()),
        Some(json!([passenger(4, "Ann"), passenger(5, "Foo")]))
    );
    assert_eq!(
        h.store.get(&Passengers::entity_key(5)),
        Some(passenger(5, "Foo"))
    );

    let received = h.notifier.received();
    assert_eq!(received[0].level, NotificationLevel::Error);
    assert_eq!(received[0].message, "Something went wrong");
}

#[tokio::test]
async fn test_successful_edit_sends_draft_and_reconciles() {
    let h = harness::<Passengers>(MockTransport::new().with_response(
        Method::Put,
        "passengers/5",
        200,
        passenger(5, "Bar"),
    ));
    seed_passengers(h.store.as_ref());

    let updated = h.service.update(5, rename("Bar")).await.unwrap();
    assert_eq!(updated.name, "Bar");

    assert_eq!(
        h.store.get(&Passengers::list_key()),
        Some(json!([passenger(4, "Ann"), passenger(5, "Bar")]))
    );
    assert_eq!(
        h.store.get_fresh(&Passengers::entity_key(5)),
        Some(passenger(5, "Bar"))
    );

    let log = h.transport.request_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, Method::Put);
    assert_eq!(log[0].bearer.as_deref(), Some("test-token"));
    assert_eq!(log[0].body, Some(json!({"name": "Bar", "weight_lb": 180.0})));
}

#[tokio::test]
async fn test_aircraft_edit_invalidates_performance() {
    let aircraft = json!({
        "id": 3,
        "model": "C172S",
        "registration": "C-GSKY",
        "is_preferred": true,
        "fuel_capacity_gal": 56.0,
        "max_takeoff_weight_lb": 2550.0,
        "created_at": "2026-01-01T00:00:00Z",
        "last_updated": "2026-02-01T00:00:00Z"
    });
    let h = harness::<Aircraft>(MockTransport::new().with_response(
        Method::Put,
        "aircraft/3",
        200,
        aircraft,
    ));
    let performance = Aircraft::entity_key(3).with("performance");
    let other = Aircraft::entity_key(4).with("performance");
    h.store.set(&performance, json!({}));
    h.store.set(&other, json!({}));

    let draft = AircraftProfileDraft {
        model: "C172S".into(),
        registration: "C-GSKY".into(),
        is_preferred: true,
        fuel_capacity_gal: 56.0,
        max_takeoff_weight_lb: 2550.0,
    };
    h.service.update(3, draft).await.unwrap();

    assert!(h.store.entry(&performance).unwrap().stale);
    assert!(!h.store.entry(&other).unwrap().stale);
    assert_eq!(h.notifier.received()[0].message, "Aircraft profile updated");
}

// ============ Delete ============

#[tokio::test]
async fn test_delete_removes_entity_everywhere() {
    let h = harness::<Passengers>(MockTransport::new().with_raw_response(
        Method::Delete,
        "passengers/5",
        204,
        "",
    ));
    seed_passengers(h.store.as_ref());

    h.service.delete(5).await.unwrap();

    assert_eq!(
        h.store.get(&Passengers::list_key()),
        Some(json!([passenger(4, "Ann")]))
    );
    assert_eq!(h.store.get(&Passengers::entity_key(5)), None);
    assert_eq!(h.notifier.received()[0].message, "Passenger deleted");
}

#[tokio::test]
async fn test_failed_delete_restores_entity() {
    let h = harness::<Passengers>(MockTransport::new().with_failure());
    seed_passengers(h.store.as_ref());

    let err = h.service.delete(5).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        h.store.get(&Passengers::list_key()),
        Some(json!([passenger(4, "Ann"), passenger(5, "Foo")]))
    );
    assert_eq!(
        h.store.get(&Passengers::entity_key(5)),
        Some(passenger(5, "Foo"))
    );
}
